//! 监视器配置

use crate::loss::ConfigError;
use crate::sim::SimTime;

pub const DEFAULT_INTERVAL_MS: u64 = 300;
pub const DEFAULT_HISTORY_LEN: usize = 50;

/// tick 周期与历史窗口长度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub interval: SimTime,
    /// 保留最近多少条 tick 记录；满了丢弃最旧的
    pub history_len: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: SimTime::from_millis(DEFAULT_INTERVAL_MS),
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}
