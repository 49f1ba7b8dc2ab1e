//! 丢包监视器
//!
//! 用仿真器的周期定时器驱动丢包模拟：每个 tick 先生成一个包，再读取统计快照。

mod config;
mod monitor_tick;
mod monitor_world;

pub use config::{DEFAULT_HISTORY_LEN, DEFAULT_INTERVAL_MS, MonitorConfig};
pub use monitor_tick::MonitorTick;
pub use monitor_world::{LossMonitor, TickRecord};
