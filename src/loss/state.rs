//! 丢包统计状态
//!
//! 定义 Normal/Burst 状态、累计计数器及只读快照。

use serde::Serialize;

/// 突发状态机的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstState {
    #[default]
    Normal,
    Burst,
}

/// 累计计数器。`received` 不单独存储，由其余计数推导。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LossStatistics {
    pub total_packets: u64,
    pub lost_packets: u64,
    pub retransmitted_packets: u64,
    /// Normal → Burst 的转换次数
    pub burst_event_count: u64,
    pub state: BurstState,
}

impl LossStatistics {
    pub fn in_burst(&self) -> bool {
        self.state == BurstState::Burst
    }

    pub fn received_packets(&self) -> u64 {
        self.total_packets
            .saturating_sub(self.lost_packets)
            .saturating_sub(self.retransmitted_packets)
    }

    /// 所有计数归零并回到 Normal
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> LossSnapshot {
        let loss_rate = if self.total_packets > 0 {
            self.lost_packets as f64 / self.total_packets as f64 * 100.0
        } else {
            0.0
        };
        LossSnapshot {
            total: self.total_packets,
            lost: self.lost_packets,
            retransmitted: self.retransmitted_packets,
            loss_rate,
            burst_events: self.burst_event_count,
        }
    }
}

/// 对外暴露的只读统计快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LossSnapshot {
    pub total: u64,
    pub lost: u64,
    pub retransmitted: u64,
    /// 百分比，`lost / total * 100`；`total == 0` 时为 0
    pub loss_rate: f64,
    pub burst_events: u64,
}

impl LossSnapshot {
    /// 丢包中经重传恢复的百分比；没有丢包时为 0
    pub fn recovery_rate(&self) -> f64 {
        let dropped = self.lost + self.retransmitted;
        if dropped == 0 {
            return 0.0;
        }
        self.retransmitted as f64 / dropped as f64 * 100.0
    }

    pub fn received(&self) -> u64 {
        self.total
            .saturating_sub(self.lost)
            .saturating_sub(self.retransmitted)
    }
}
