//! 统计信息
//!
//! 对一批合成数据包做协议分布统计。

mod protocol_stats;

pub use protocol_stats::{ProtocolStat, protocol_stats};
