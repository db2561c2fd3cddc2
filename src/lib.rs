//! Palace Voice - 长文本语音合成网关
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 文本分块、音色表、音频拼接与编码
//!
//! 应用层 (application/):
//! - Ports: TtsEngine
//! - Commands: 语音合成（分块 + 限流重试 + 拼接）
//! - Queries: 音色列表
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: ElevenLabs Client, Fake Client

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
