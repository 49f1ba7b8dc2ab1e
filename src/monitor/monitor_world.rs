//! 监视器世界实现
//!
//! 持有丢包模拟器、最新快照和有界的 tick 历史。

use super::config::MonitorConfig;
use super::monitor_tick::MonitorTick;
use crate::loss::{ConfigError, LossSnapshot, PacketEventSimulator, RandomSource};
use crate::packet::SimulatedPacket;
use crate::sim::{SimTime, Simulator, TimerId, World};
use serde::Serialize;
use std::any::Any;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// 一次 tick 的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    pub at: SimTime,
    pub packet: SimulatedPacket,
    pub snapshot: LossSnapshot,
}

/// 丢包监视器：作为仿真世界接收周期 tick。
pub struct LossMonitor<R> {
    sim: PacketEventSimulator<R>,
    config: MonitorConfig,
    latest: LossSnapshot,
    history: VecDeque<TickRecord>,
    pending: Option<TimerId>,
    ticks: u64,
}

impl<R: RandomSource + 'static> LossMonitor<R> {
    pub fn new(sim: PacketEventSimulator<R>, config: MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        sim.config().validate()?;
        let latest = sim.loss_statistics();
        Ok(Self {
            sim,
            config,
            latest,
            history: VecDeque::with_capacity(config.history_len),
            pending: None,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn simulator(&self) -> &PacketEventSimulator<R> {
        &self.sim
    }

    /// 最近一次 tick 读到的快照
    pub fn latest(&self) -> LossSnapshot {
        self.latest
    }

    pub fn history(&self) -> &VecDeque<TickRecord> {
        &self.history
    }

    /// 自启动以来执行过的 tick 数（不受 reset 影响）
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// 在 `at` 调度第一个 tick。已在运行时返回现有句柄。
    pub fn start(&mut self, sim: &mut Simulator, at: SimTime) -> TimerId {
        if let Some(id) = self.pending {
            warn!("monitor already running");
            return id;
        }
        info!(start_at = %at, interval = %self.config.interval, "▶️  启动丢包监视器");
        let id = sim.schedule(at, MonitorTick::<R>::new());
        self.pending = Some(id);
        id
    }

    /// 取消下一个 tick。返回是否确实取消了一个待执行的 tick。
    pub fn stop(&mut self, sim: &mut Simulator) -> bool {
        let Some(id) = self.pending.take() else {
            return false;
        };
        let cancelled = sim.cancel(id);
        info!(ticks = self.ticks, cancelled, "⏹️  停止丢包监视器");
        cancelled
    }

    /// 清零统计与历史
    pub fn reset(&mut self) {
        self.sim.reset_statistics();
        self.history.clear();
        self.latest = self.sim.loss_statistics();
    }

    /// 采样一次：生成包、读取快照、记录并调度下一个 tick。
    pub(crate) fn sample(&mut self, sim: &mut Simulator) {
        let at = sim.now();
        self.sim.advance_to(at);
        let packet = self.sim.generate_packet();
        self.latest = self.sim.loss_statistics();
        self.ticks += 1;

        debug!(
            at = %at,
            seq = packet.sequence_number,
            status = %packet.status,
            loss_rate = self.latest.loss_rate,
            burst = self.sim.in_burst(),
            "tick"
        );

        if self.config.history_len > 0 {
            if self.history.len() == self.config.history_len {
                self.history.pop_front();
            }
            self.history.push_back(TickRecord {
                at,
                packet,
                snapshot: self.latest,
            });
        }

        // 时间轴到头后不再重新调度，否则会在同一时刻无限触发
        match at.checked_add(self.config.interval).filter(|next| *next > at) {
            Some(next_at) => {
                let next = sim.schedule(next_at, MonitorTick::<R>::new());
                self.pending = Some(next);
            }
            None => {
                warn!(at = %at, interval = %self.config.interval, "下一个 tick 超出仿真时间范围，监视器停止");
                self.pending = None;
            }
        }
    }
}

impl<R: 'static> World for LossMonitor<R> {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
