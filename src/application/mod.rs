//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine）
//! - commands: 语音合成命令及处理器
//! - queries: 音色查询及处理器
//! - retry: 限流重试策略
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod retry;

// Re-exports
pub use commands::{
    handlers::{SynthesisSettings, SynthesizeSpeechHandler},
    SynthesizeSpeechCommand, SynthesizeSpeechResponse,
};

pub use error::ApplicationError;

pub use ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

pub use queries::{
    handlers::{ListVoicesHandler, VoiceItem, VoiceListResponse},
    ListVoices,
};

pub use retry::RetryPolicy;
