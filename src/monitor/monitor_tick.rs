//! 周期 tick 事件
//!
//! 执行一次采样后在 `now + interval` 重新调度自己，直到监视器被停止。

use super::monitor_world::LossMonitor;
use crate::loss::RandomSource;
use crate::sim::{Event, Simulator, World};
use std::marker::PhantomData;
use tracing::warn;

/// 事件：驱动 `LossMonitor<R>` 采样一次。
pub struct MonitorTick<R> {
    _rng: PhantomData<fn() -> R>,
}

impl<R> MonitorTick<R> {
    // 只能由 LossMonitor 创建，保证同一时刻只有一条 tick 链
    pub(crate) fn new() -> Self {
        Self { _rng: PhantomData }
    }
}

impl<R: RandomSource + 'static> Event for MonitorTick<R> {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Some(monitor) = world.as_any_mut().downcast_mut::<LossMonitor<R>>() else {
            warn!("world is not a LossMonitor, tick dropped");
            return;
        };
        monitor.sample(sim);
    }

    fn name(&self) -> &'static str {
        "MonitorTick"
    }
}
