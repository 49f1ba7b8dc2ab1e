//! 来源注册表

use super::stream_source::{SourceDraft, SourceError, SourceId, SourceUpdate, StreamSource};
use std::time::SystemTime;
use tracing::info;

/// 内存中的来源列表（按创建顺序存储）
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<StreamSource>,
    next_id: u64,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// 最新创建的在前
    pub fn list(&self) -> impl Iterator<Item = &StreamSource> {
        self.sources.iter().rev()
    }

    pub fn get(&self, id: SourceId) -> Option<&StreamSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn active(&self) -> Option<&StreamSource> {
        self.sources.iter().find(|s| s.active)
    }

    fn get_mut(&mut self, id: SourceId) -> Result<&mut StreamSource, SourceError> {
        self.sources
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SourceError::NotFound(id))
    }

    /// 新增来源；新来源总是非活动的
    pub fn add(&mut self, draft: SourceDraft) -> Result<&StreamSource, SourceError> {
        let draft = draft.normalize()?;
        self.next_id += 1;
        let id = SourceId(self.next_id);
        info!(%id, name = %draft.name, url = %draft.url, "添加来源");
        let mut source = StreamSource {
            id,
            name: String::new(),
            kind: draft.kind,
            url: String::new(),
            host: None,
            port: None,
            path: None,
            active: false,
            last_connected: None,
        };
        source.apply_draft(draft);
        self.sources.push(source);
        Ok(&self.sources[self.sources.len() - 1])
    }

    /// 部分更新，合并后整体重新校验；校验失败时原记录不变
    pub fn update(&mut self, id: SourceId, changes: SourceUpdate) -> Result<&StreamSource, SourceError> {
        let source = self.get_mut(id)?;
        let draft = changes.merge_into(source.to_draft()).normalize()?;
        source.apply_draft(draft);
        info!(%id, name = %source.name, "更新来源");
        Ok(source)
    }

    pub fn delete(&mut self, id: SourceId) -> Result<StreamSource, SourceError> {
        let idx = self
            .sources
            .iter()
            .position(|s| s.id == id)
            .ok_or(SourceError::NotFound(id))?;
        info!(%id, "删除来源");
        Ok(self.sources.remove(idx))
    }

    /// 激活 `id` 并停用其他所有来源
    pub fn connect(&mut self, id: SourceId, now: SystemTime) -> Result<&StreamSource, SourceError> {
        self.get_mut(id)?;
        for source in &mut self.sources {
            source.active = false;
        }
        let source = self.get_mut(id)?;
        source.active = true;
        source.last_connected = Some(now);
        info!(%id, name = %source.name, "连接来源");
        Ok(source)
    }

    /// 停用当前活动来源；没有活动来源时返回 false
    pub fn disconnect(&mut self) -> bool {
        let Some(source) = self.sources.iter_mut().find(|s| s.active) else {
            return false;
        };
        source.active = false;
        info!(id = %source.id, name = %source.name, "断开来源");
        true
    }
}
