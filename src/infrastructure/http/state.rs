//! Application State
//!
//! HTTP handlers 共享的只读状态

use std::sync::Arc;

use crate::application::{
    ListVoicesHandler, SynthesisSettings, SynthesizeSpeechHandler, TtsEnginePort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub tts_engine: Arc<dyn TtsEnginePort>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, settings: SynthesisSettings) -> Self {
        let list_voices_handler = ListVoicesHandler::new(settings.default_voice.clone());
        Self {
            tts_engine: tts_engine.clone(),
            synthesize_handler: SynthesizeSpeechHandler::new(tts_engine, settings),
            list_voices_handler,
        }
    }
}
