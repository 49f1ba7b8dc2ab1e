//! 合成数据包
//!
//! 定义由丢包模拟器产生的数据包。

use super::id::PacketId;
use super::protocol::{PacketStatus, Protocol};
use crate::sim::SimTime;
use serde::Serialize;

pub const MIN_PACKET_BYTES: u32 = 100;
pub const MAX_PACKET_BYTES: u32 = 1099;

/// 一个合成数据包
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedPacket {
    pub id: PacketId,
    pub timestamp: SimTime,
    pub protocol: Protocol,
    /// 等于生成时的全局包计数（从 1 开始，无间隙）
    pub sequence_number: u64,
    pub status: PacketStatus,
    #[serde(rename = "size")]
    pub size_bytes: u32,
}

impl SimulatedPacket {
    /// 由 `[0, 1)` 内的随机值得到包长：`floor(r * 1000) + 100`。
    pub fn size_from_unit(r: f64) -> u32 {
        let span = MAX_PACKET_BYTES - MIN_PACKET_BYTES + 1;
        let offset = (r * span as f64) as u32;
        MIN_PACKET_BYTES + offset.min(span - 1)
    }

    pub fn is_lost(&self) -> bool {
        self.status == PacketStatus::Lost
    }

    /// 丢失后经重传恢复
    pub fn is_recovered(&self) -> bool {
        self.status == PacketStatus::Retransmitted
    }
}
