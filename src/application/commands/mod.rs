//! 应用层 - 命令
//!
//! 语音合成命令

mod synthesize_commands;

pub mod handlers;

pub use synthesize_commands::*;
