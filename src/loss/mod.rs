//! 突发丢包模拟模块
//!
//! 此模块包含丢包模拟器的核心组件：概率配置、可注入随机源、Normal/Burst 状态机以及累计统计。

// 子模块声明
mod config;
mod random;
mod shared;
mod simulator;
mod state;

// 重新导出公共接口
pub use config::{ConfigError, LossConfig};
pub use random::{Draw, RandomSource, RngSource, ScriptedSource};
pub use shared::SharedSimulator;
pub use simulator::{PacketEventSimulator, SOURCE_LABEL};
pub use state::{BurstState, LossSnapshot, LossStatistics};
