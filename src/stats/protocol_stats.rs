use crate::packet::{Protocol, SimulatedPacket};
use serde::Serialize;

/// 单个协议的计数与占比
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProtocolStat {
    pub protocol: Protocol,
    pub count: u64,
    /// 百分比，`count / len * 100`
    pub percentage: f64,
}

/// 按协议计数，只列出出现过的协议；按数量降序，数量相同时按 `Protocol::ALL` 顺序。
pub fn protocol_stats(packets: &[SimulatedPacket]) -> Vec<ProtocolStat> {
    let mut counts = [0u64; Protocol::ALL.len()];
    for pkt in packets {
        if let Some(idx) = Protocol::ALL.iter().position(|p| *p == pkt.protocol) {
            counts[idx] += 1;
        }
    }

    let total = packets.len() as f64;
    let mut out: Vec<ProtocolStat> = Protocol::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(protocol, count)| ProtocolStat {
            protocol: *protocol,
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect();
    // 稳定排序保留 ALL 顺序作为次序
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}
