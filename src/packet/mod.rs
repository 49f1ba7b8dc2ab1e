//! 模拟数据包模块
//!
//! 定义合成数据包及其协议、状态和标识符。数据包只在内存中短暂存在，不做持久化。

// 子模块声明
mod id;
mod protocol;
mod simulated;

// 重新导出公共接口
pub use id::PacketId;
pub use protocol::{PacketStatus, Protocol};
pub use simulated::{MAX_PACKET_BYTES, MIN_PACKET_BYTES, SimulatedPacket};
