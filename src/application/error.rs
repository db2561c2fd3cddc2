//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::TtsError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 输入无效（文本为空等），不会发起任何上游调用
    #[error("Invalid input: {0}")]
    InputError(String),

    /// 部署配置错误（缺少上游凭证）
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 重试耗尽后仍被限流
    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    /// 上游返回非限流错误
    #[error("TTS provider error: {0}")]
    ProviderError(String),
}

impl ApplicationError {
    /// 创建输入错误
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError(message.into())
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::MissingCredential | TtsError::InvalidConfig(_) => {
                Self::ConfigurationError(err.to_string())
            }
            TtsError::InvalidVoiceId(_) => Self::InputError(err.to_string()),
            // 重试循环之外出现的限流按单次尝试计
            TtsError::RateLimited => Self::RateLimitExceeded { attempts: 1 },
            other => Self::ProviderError(other.to_string()),
        }
    }
}
