//! Voice Query Handlers

use crate::application::queries::ListVoices;
use crate::domain::voice::{list_voices, lookup};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色条目
#[derive(Debug, Clone)]
pub struct VoiceItem {
    pub key: String,
    pub voice_id: String,
}

/// 音色列表响应
#[derive(Debug, Clone)]
pub struct VoiceListResponse {
    /// 默认音色名称
    pub default_voice: String,
    pub voices: Vec<VoiceItem>,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    default_voice: String,
}

impl ListVoicesHandler {
    pub fn new(default_voice: impl Into<String>) -> Self {
        Self {
            default_voice: default_voice.into(),
        }
    }

    pub fn handle(&self, _query: ListVoices) -> VoiceListResponse {
        let voices = list_voices()
            .iter()
            .map(|v| VoiceItem {
                key: v.key.to_string(),
                voice_id: v.provider_id.to_string(),
            })
            .collect();

        VoiceListResponse {
            default_voice: self.default_voice.clone(),
            voices,
        }
    }

    /// 默认音色是否在音色表中
    pub fn default_is_known(&self) -> bool {
        lookup(&self.default_voice).is_some()
    }
}
