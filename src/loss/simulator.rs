//! 数据包事件模拟器
//!
//! 每次调用产生一个合成数据包，并按 Normal/Burst 状态机更新丢包统计。
//!
//! 状态机：
//! - 丢包概率：Normal 下为 `normal_loss`，Burst 下为 `burst_loss`
//! - 未丢包：RECEIVED，不发生状态转换
//! - 丢包：Normal 下以 `burst_enter` 进入 Burst（`burst_event_count += 1`）；
//!   Burst 下以 `burst_exit` 回到 Normal；随后独立地以 `retransmit` 标记为
//!   RETRANSMITTED，否则为 LOST

use super::config::{ConfigError, LossConfig};
use super::random::{Draw, RandomSource, RngSource};
use super::state::{BurstState, LossSnapshot, LossStatistics};
use crate::packet::{PacketId, PacketStatus, Protocol, SimulatedPacket};
use crate::sim::SimTime;
use tracing::{debug, info, trace};

/// 数据源描述（固定字符串，不携带状态）
pub const SOURCE_LABEL: &str = "DVB-S2 Stream Simulator";

/// 丢包事件模拟器：独占自己的状态，多个实例互不干扰。
#[derive(Debug, Clone)]
pub struct PacketEventSimulator<R = RngSource> {
    config: LossConfig,
    rng: R,
    stats: LossStatistics,
    now: SimTime,
}

impl PacketEventSimulator<RngSource> {
    /// 默认概率 + 固定种子
    pub fn seeded(seed: u64) -> Self {
        Self::new(LossConfig::default(), RngSource::seeded(seed))
    }
}

impl<R: RandomSource> PacketEventSimulator<R> {
    /// 使用已校验的配置创建模拟器
    pub fn new(config: LossConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            stats: LossStatistics::default(),
            now: SimTime::ZERO,
        }
    }

    /// 先校验配置再创建
    pub fn try_new(config: LossConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, rng))
    }

    pub fn config(&self) -> &LossConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn statistics(&self) -> &LossStatistics {
        &self.stats
    }

    pub fn burst_state(&self) -> BurstState {
        self.stats.state
    }

    pub fn in_burst(&self) -> bool {
        self.stats.in_burst()
    }

    /// 新数据包使用的时间戳
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 推进时钟；时间不会倒退。
    pub fn advance_to(&mut self, at: SimTime) {
        self.now = self.now.max(at);
    }

    pub fn current_source_label(&self) -> &'static str {
        SOURCE_LABEL
    }

    /// 生成一个数据包，并恰好更新一次统计状态。
    pub fn generate_packet(&mut self) -> SimulatedPacket {
        let protocol = Protocol::from_unit(self.rng.sample(Draw::Protocol));

        let loss_p = match self.stats.state {
            BurstState::Normal => self.config.normal_loss,
            BurstState::Burst => self.config.burst_loss,
        };
        let status = if self.rng.chance(Draw::Loss, loss_p) {
            self.on_loss()
        } else {
            PacketStatus::Received
        };

        self.stats.total_packets += 1;
        let seq = self.stats.total_packets;
        let size_bytes = SimulatedPacket::size_from_unit(self.rng.sample(Draw::Size));

        trace!(seq, %protocol, %status, size_bytes, state = ?self.stats.state, "生成数据包");

        SimulatedPacket {
            id: PacketId(seq),
            timestamp: self.now,
            protocol,
            sequence_number: seq,
            status,
            size_bytes,
        }
    }

    /// 丢包分支：先做状态转换检查，再独立决定是否重传。
    fn on_loss(&mut self) -> PacketStatus {
        match self.stats.state {
            BurstState::Normal => {
                if self.rng.chance(Draw::BurstEnter, self.config.burst_enter) {
                    self.stats.state = BurstState::Burst;
                    self.stats.burst_event_count += 1;
                    debug!(
                        burst_events = self.stats.burst_event_count,
                        seq = self.stats.total_packets + 1,
                        "进入突发丢包"
                    );
                }
            }
            BurstState::Burst => {
                if self.rng.chance(Draw::BurstExit, self.config.burst_exit) {
                    self.stats.state = BurstState::Normal;
                    debug!(seq = self.stats.total_packets + 1, "突发丢包结束");
                }
            }
        }

        if self.rng.chance(Draw::Retransmit, self.config.retransmit) {
            self.stats.retransmitted_packets += 1;
            PacketStatus::Retransmitted
        } else {
            self.stats.lost_packets += 1;
            PacketStatus::Lost
        }
    }

    /// 连续生成 `count` 个数据包
    pub fn generate_packets(&mut self, count: usize) -> Vec<SimulatedPacket> {
        (0..count).map(|_| self.generate_packet()).collect()
    }

    /// 当前统计快照（只读）
    pub fn loss_statistics(&self) -> LossSnapshot {
        self.stats.snapshot()
    }

    /// 计数清零、回到 Normal。包序号随总数一起归零，下一个包从 1 开始。
    pub fn reset_statistics(&mut self) {
        info!(total = self.stats.total_packets, "重置丢包统计");
        self.stats.clear();
    }
}
