//! 线程安全的模拟器句柄
//!
//! 五个计数器必须作为一个整体更新和读取，因此所有操作都在同一把锁内完成。

use super::random::{RandomSource, RngSource};
use super::simulator::PacketEventSimulator;
use super::state::LossSnapshot;
use crate::packet::SimulatedPacket;
use crate::sim::SimTime;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 可克隆的共享模拟器
#[derive(Debug)]
pub struct SharedSimulator<R = RngSource> {
    inner: Arc<Mutex<PacketEventSimulator<R>>>,
}

impl<R> Clone for SharedSimulator<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource> SharedSimulator<R> {
    pub fn new(sim: PacketEventSimulator<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sim)),
        }
    }

    // 计数器在每次操作结束时都是一致的，锁中毒后仍可继续使用。
    fn lock(&self) -> MutexGuard<'_, PacketEventSimulator<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn generate_packet(&self) -> SimulatedPacket {
        self.lock().generate_packet()
    }

    pub fn loss_statistics(&self) -> LossSnapshot {
        self.lock().loss_statistics()
    }

    pub fn reset_statistics(&self) {
        self.lock().reset_statistics();
    }

    pub fn in_burst(&self) -> bool {
        self.lock().in_burst()
    }

    /// 一次 tick：在 `at` 时刻生成一个包并读取快照，两步在同一临界区内。
    pub fn tick(&self, at: SimTime) -> (SimulatedPacket, LossSnapshot) {
        let mut sim = self.lock();
        sim.advance_to(at);
        let pkt = sim.generate_packet();
        (pkt, sim.loss_statistics())
    }

    /// 在锁内对模拟器执行任意只读操作
    pub fn with<T>(&self, f: impl FnOnce(&PacketEventSimulator<R>) -> T) -> T {
        f(&*self.lock())
    }
}
