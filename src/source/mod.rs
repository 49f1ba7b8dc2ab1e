//! 数据流来源
//!
//! 已配置的流来源列表：内存中的增删改查，同一时刻至多一个来源处于活动状态。
//! 不连接任何真实设备。

mod registry;
mod stream_source;

pub use registry::SourceRegistry;
pub use stream_source::{SourceDraft, SourceError, SourceId, SourceKind, SourceUpdate, StreamSource};
