//! 标识符类型
//!
//! 定义数据包的唯一标识符。

use serde::{Serialize, Serializer};
use std::fmt;

/// 数据包标识符：由序号派生，显示为 `packet-<n>`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PacketId(pub u64);

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "packet-{}", self.0)
    }
}

impl Serialize for PacketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
