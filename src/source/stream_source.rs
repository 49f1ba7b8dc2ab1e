//! 来源记录与校验

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;
use thiserror::Error;

/// 来源标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source-{}", self.0)
    }
}

/// 来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Receiver,
    Network,
    File,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("source name must not be empty")]
    MissingName,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("no such source: {0}")]
    NotFound(SourceId),
}

/// 一个已配置的流来源
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamSource {
    pub id: SourceId,
    pub name: String,
    pub kind: SourceKind,
    pub url: String,
    pub host: Option<String>,
    pub port: Option<String>,
    pub path: Option<String>,
    pub active: bool,
    pub last_connected: Option<SystemTime>,
}

/// 新建来源的输入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDraft {
    pub name: String,
    pub kind: SourceKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl SourceDraft {
    pub fn new(name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            url: String::new(),
            host: None,
            port: None,
            path: None,
        }
    }

    pub fn network(name: impl Into<String>, host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port.into()),
            ..Self::new(name, SourceKind::Network)
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new(name, SourceKind::File)
        }
    }

    pub fn receiver(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new(name, SourceKind::Receiver)
        }
    }

    /// 校验必填字段并推导 URL：network → `udp://host:port`，file → path。
    pub(crate) fn normalize(mut self) -> Result<Self, SourceError> {
        if self.name.trim().is_empty() {
            return Err(SourceError::MissingName);
        }
        match self.kind {
            SourceKind::Network => {
                let host = non_blank(self.host.as_deref()).ok_or(SourceError::MissingField("host"))?;
                let port = non_blank(self.port.as_deref()).ok_or(SourceError::MissingField("port"))?;
                self.url = format!("udp://{host}:{port}");
            }
            SourceKind::File => {
                let path = non_blank(self.path.as_deref()).ok_or(SourceError::MissingField("path"))?;
                self.url = path.to_string();
            }
            SourceKind::Receiver => {
                if self.url.trim().is_empty() {
                    return Err(SourceError::MissingField("url"));
                }
            }
        }
        Ok(self)
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

/// 部分更新：只覆盖给出的字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceUpdate {
    pub name: Option<String>,
    pub kind: Option<SourceKind>,
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub path: Option<String>,
}

impl StreamSource {
    pub(crate) fn to_draft(&self) -> SourceDraft {
        SourceDraft {
            name: self.name.clone(),
            kind: self.kind,
            url: self.url.clone(),
            host: self.host.clone(),
            port: self.port.clone(),
            path: self.path.clone(),
        }
    }

    pub(crate) fn apply_draft(&mut self, draft: SourceDraft) {
        self.name = draft.name;
        self.kind = draft.kind;
        self.url = draft.url;
        self.host = draft.host;
        self.port = draft.port;
        self.path = draft.path;
    }
}

impl SourceUpdate {
    pub(crate) fn merge_into(self, mut draft: SourceDraft) -> SourceDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(kind) = self.kind {
            draft.kind = kind;
        }
        if let Some(url) = self.url {
            draft.url = url;
        }
        if self.host.is_some() {
            draft.host = self.host;
        }
        if self.port.is_some() {
            draft.port = self.port;
        }
        if self.path.is_some() {
            draft.path = self.path;
        }
        draft
    }
}
