//! 插件模型内存实现

use crate::error::StorageError;
use crate::models::{PluginModelCreate, PluginModelRecord, PluginModelUpdate};
use crate::traits::PluginModelStore;
use crate::validation::{ensure_external_id, ensure_name};
use std::collections::BTreeMap;
use std::sync::RwLock;

struct ModelTable {
    next_id: u64,
    records: BTreeMap<u64, PluginModelRecord>,
}

/// 插件模型内存存储
///
/// ID 从 1 开始顺序分配，删除后不复用。
pub struct InMemoryPluginModelStore {
    table: RwLock<ModelTable>,
}

impl InMemoryPluginModelStore {
    /// 创建新的插件模型存储
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ModelTable {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryPluginModelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PluginModelStore for InMemoryPluginModelStore {
    async fn list_models(&self) -> Result<Vec<PluginModelRecord>, StorageError> {
        let table = self
            .table
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(table.records.values().cloned().collect())
    }

    async fn find_model(&self, id: u64) -> Result<Option<PluginModelRecord>, StorageError> {
        let table = self
            .table
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(table.records.get(&id).cloned())
    }

    async fn create_model(
        &self,
        input: PluginModelCreate,
    ) -> Result<PluginModelRecord, StorageError> {
        ensure_name(&input.name)?;
        ensure_external_id(&input.external_id)?;
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let id = table.next_id;
        table.next_id += 1;
        let record = PluginModelRecord {
            id,
            name: input.name,
            description: input.description,
            external_id: input.external_id,
        };
        table.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update_model(
        &self,
        id: u64,
        update: PluginModelUpdate,
    ) -> Result<Option<PluginModelRecord>, StorageError> {
        if let Some(name) = update.name.as_deref() {
            ensure_name(name)?;
        }
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let record = match table.records.get_mut(&id) {
            Some(record) => record,
            None => return Ok(None),
        };
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(description) = update.description {
            record.description = Some(description);
        }
        Ok(Some(record.clone()))
    }

    async fn delete_models(&self, ids: &[u64]) -> Result<usize, StorageError> {
        if ids.is_empty() {
            return Err(StorageError::new("no models selected"));
        }
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if ids.iter().any(|id| !table.records.contains_key(id)) {
            return Err(StorageError::new("model not found"));
        }
        let mut deleted = 0;
        for id in ids {
            if table.records.remove(id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
