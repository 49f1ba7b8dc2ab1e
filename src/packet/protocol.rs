//! 协议与状态枚举
//!
//! BBFrame/GSE/TS 等只是枚举标签，这里不做任何真实解析。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 数据包所属协议 / 帧类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Protocol {
    #[serde(rename = "RTP")]
    Rtp,
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "SIP")]
    Sip,
    #[serde(rename = "FTP")]
    Ftp,
    #[serde(rename = "SMTP")]
    Smtp,
    #[serde(rename = "TS")]
    Ts,
    #[serde(rename = "GSE")]
    Gse,
    #[serde(rename = "BBFrame")]
    BbFrame,
}

impl Protocol {
    /// 固定顺序；均匀抽样和统计排序都依赖这个顺序。
    pub const ALL: [Protocol; 8] = [
        Protocol::Rtp,
        Protocol::Http,
        Protocol::Sip,
        Protocol::Ftp,
        Protocol::Smtp,
        Protocol::Ts,
        Protocol::Gse,
        Protocol::BbFrame,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Rtp => "RTP",
            Protocol::Http => "HTTP",
            Protocol::Sip => "SIP",
            Protocol::Ftp => "FTP",
            Protocol::Smtp => "SMTP",
            Protocol::Ts => "TS",
            Protocol::Gse => "GSE",
            Protocol::BbFrame => "BBFrame",
        }
    }

    /// 由 `[0, 1)` 内的随机值均匀选择协议（`floor(r * 8)`）。
    pub fn from_unit(r: f64) -> Protocol {
        let idx = (r * Self::ALL.len() as f64) as usize;
        Self::ALL[idx.min(Self::ALL.len() - 1)]
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 数据包最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PacketStatus {
    Received,
    Lost,
    Retransmitted,
}

impl PacketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PacketStatus::Received => "RECEIVED",
            PacketStatus::Lost => "LOST",
            PacketStatus::Retransmitted => "RETRANSMITTED",
        }
    }
}

impl fmt::Display for PacketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
