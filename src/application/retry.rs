//! Retry Policy - 限流重试策略
//!
//! 指数退避：第 n 次尝试被限流后等待 `base_delay * 2^(n-1)`

use std::time::Duration;

/// 默认最大尝试次数（含首次）
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// 默认退避基数
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// 退避延迟上限，避免配置过大时溢出
const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// 限流重试策略
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 每个片段的最大尝试次数（含首次），至少为 1
    pub max_attempts: u32,
    /// 第一次重试前的等待时间
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// 第 `attempt` 次尝试（从 1 开始）被限流后的等待时间
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(MAX_BACKOFF)
            .min(MAX_BACKOFF)
    }

    /// 第 `attempt` 次尝试被限流后是否还能重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
