//! 丢包概率配置
//!
//! 五个概率阈值均可注入，默认值对应卫星链路的典型突发丢包曲线。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("tick interval must be greater than zero")]
    ZeroInterval,
}

/// 状态机的概率阈值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LossConfig {
    /// Normal 状态下的丢包概率
    pub normal_loss: f64,
    /// Burst 状态下的丢包概率
    pub burst_loss: f64,
    /// Normal 状态下丢包时进入 Burst 的概率
    pub burst_enter: f64,
    /// Burst 状态下丢包时回到 Normal 的概率
    pub burst_exit: f64,
    /// 丢包被标记为已重传的概率
    pub retransmit: f64,
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            normal_loss: 0.05,
            burst_loss: 0.40,
            burst_enter: 0.30,
            burst_exit: 0.20,
            retransmit: 0.60,
        }
    }
}

impl LossConfig {
    /// 检查所有概率都是 `[0, 1]` 内的有限值
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.fields() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("normal_loss", self.normal_loss),
            ("burst_loss", self.burst_loss),
            ("burst_enter", self.burst_enter),
            ("burst_exit", self.burst_exit),
            ("retransmit", self.retransmit),
        ]
    }
}
