//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件：仿真时间、事件、世界和仿真器。
//! 周期性的采样 tick 就是在这里调度和取消的。

// 子模块声明
mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use event::Event;
pub use scheduled_event::{ScheduledEvent, TimerId};
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
