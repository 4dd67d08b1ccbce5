//! MAM 客户端内存实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 收藏集 / library / 条目元数据 / 用户的内存模型
//! - ID 按 `VX-<n>` 递增分配
//! - 按操作注入故障（一次性或持续）
//! - 记录调用顺序，便于断言"没有发生远程调用"

use crate::client::{MamClient, MamOperation};
use crate::error::MamError;
use domain::{ItemMetadata, MamUser};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

/// 收藏集记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRecord {
    pub collection_id: String,
    pub name: String,
    pub fields: HashMap<String, String>,
    pub libraries: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureMode {
    Once,
    Always,
}

#[derive(Default)]
struct MamState {
    last_id: u64,
    collections: HashMap<String, CollectionRecord>,
    libraries: HashMap<String, Vec<String>>,
    items: HashMap<String, ItemMetadata>,
    users: Vec<MamUser>,
    failures: HashMap<MamOperation, FailureMode>,
    calls: Vec<MamOperation>,
}

impl MamState {
    fn allocate_id(&mut self) -> String {
        self.last_id += 1;
        format!("VX-{}", self.last_id)
    }

    /// 记录调用，并按注入的故障决定本次是否失败。
    fn enter(&mut self, op: MamOperation) -> Result<(), MamError> {
        self.calls.push(op);
        match self.failures.get(&op).copied() {
            Some(FailureMode::Once) => {
                self.failures.remove(&op);
                Err(injected_failure(op))
            }
            Some(FailureMode::Always) => Err(injected_failure(op)),
            None => Ok(()),
        }
    }
}

fn injected_failure(op: MamOperation) -> MamError {
    MamError::api(500, format!("injected failure: {:?}", op))
}

/// MAM 内存客户端
///
/// 使用 RwLock 包裹整体状态，调用之间严格串行。
pub struct InMemoryMamClient {
    state: RwLock<MamState>,
}

impl InMemoryMamClient {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MamState::default()),
        }
    }

    fn lock(&self) -> Result<RwLockWriteGuard<'_, MamState>, MamError> {
        self.state
            .write()
            .map_err(|_| MamError::Transport("lock failed".to_string()))
    }

    // 测试辅助方法不返回错误：锁中毒时直接取回内部状态。
    fn lock_unchecked(&self) -> RwLockWriteGuard<'_, MamState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 预置收藏集（不计入调用记录）
    pub fn insert_collection(&self, name: &str, fields: &[(&str, &str)]) -> String {
        let mut state = self.lock_unchecked();
        let collection_id = state.allocate_id();
        let record = CollectionRecord {
            collection_id: collection_id.clone(),
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            libraries: Vec::new(),
        };
        state.collections.insert(collection_id.clone(), record);
        collection_id
    }

    /// 预置条目元数据
    pub fn insert_item(&self, item_id: &str, metadata: ItemMetadata) {
        self.lock_unchecked()
            .items
            .insert(item_id.to_string(), metadata);
    }

    /// 预置用户
    pub fn insert_user(&self, user: MamUser) {
        self.lock_unchecked().users.push(user);
    }

    /// 下一次该操作失败
    pub fn fail_next(&self, op: MamOperation) {
        self.lock_unchecked().failures.insert(op, FailureMode::Once);
    }

    /// 该操作持续失败，直到 `clear_failures`
    pub fn fail_always(&self, op: MamOperation) {
        self.lock_unchecked().failures.insert(op, FailureMode::Always);
    }

    pub fn clear_failures(&self) {
        self.lock_unchecked().failures.clear();
    }

    pub fn collection(&self, collection_id: &str) -> Option<CollectionRecord> {
        self.lock_unchecked().collections.get(collection_id).cloned()
    }

    pub fn collection_count(&self) -> usize {
        self.lock_unchecked().collections.len()
    }

    pub fn library_items(&self, library_id: &str) -> Option<Vec<String>> {
        self.lock_unchecked().libraries.get(library_id).cloned()
    }

    /// 按顺序返回所有已发生的调用
    pub fn calls(&self) -> Vec<MamOperation> {
        self.lock_unchecked().calls.clone()
    }

    pub fn call_count(&self, op: MamOperation) -> usize {
        self.lock_unchecked()
            .calls
            .iter()
            .filter(|call| **call == op)
            .count()
    }
}

impl Default for InMemoryMamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MamClient for InMemoryMamClient {
    async fn search_collections(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Vec<String>, MamError> {
        let mut state = self.lock()?;
        state.enter(MamOperation::SearchCollections)?;
        let mut hits: Vec<String> = state
            .collections
            .values()
            .filter(|collection| collection.fields.get(field).map(String::as_str) == Some(value))
            .map(|collection| collection.collection_id.clone())
            .collect();
        hits.sort();
        Ok(hits)
    }

    async fn create_collection(&self, name: &str) -> Result<String, MamError> {
        let mut state = self.lock()?;
        state.enter(MamOperation::CreateCollection)?;
        if name.trim().is_empty() {
            return Err(MamError::api(400, "collection name required"));
        }
        let collection_id = state.allocate_id();
        state.collections.insert(
            collection_id.clone(),
            CollectionRecord {
                collection_id: collection_id.clone(),
                name: name.to_string(),
                fields: HashMap::new(),
                libraries: Vec::new(),
            },
        );
        Ok(collection_id)
    }

    async fn set_collection_field(
        &self,
        collection_id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), MamError> {
        let mut state = self.lock()?;
        state.enter(MamOperation::SetCollectionField)?;
        let collection = state
            .collections
            .get_mut(collection_id)
            .ok_or_else(|| MamError::NotFound(format!("collection {}", collection_id)))?;
        collection
            .fields
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn create_library_from_items(&self, item_ids: &[String]) -> Result<String, MamError> {
        let mut state = self.lock()?;
        state.enter(MamOperation::CreateLibrary)?;
        let library_id = state.allocate_id();
        state.libraries.insert(library_id.clone(), item_ids.to_vec());
        Ok(library_id)
    }

    async fn add_library_to_collection(
        &self,
        collection_id: &str,
        library_id: &str,
    ) -> Result<(), MamError> {
        let mut state = self.lock()?;
        state.enter(MamOperation::AddLibraryToCollection)?;
        if !state.libraries.contains_key(library_id) {
            return Err(MamError::NotFound(format!("library {}", library_id)));
        }
        let collection = state
            .collections
            .get_mut(collection_id)
            .ok_or_else(|| MamError::NotFound(format!("collection {}", collection_id)))?;
        if !collection.libraries.iter().any(|id| id == library_id) {
            collection.libraries.push(library_id.to_string());
        }
        Ok(())
    }

    async fn get_item_metadata(&self, item_id: &str) -> Result<ItemMetadata, MamError> {
        let mut state = self.lock()?;
        state.enter(MamOperation::GetItemMetadata)?;
        state
            .items
            .get(item_id)
            .cloned()
            .ok_or_else(|| MamError::NotFound(format!("item {}", item_id)))
    }

    /// 内存实现没有"当前用户"概念，include_self 不影响结果。
    async fn list_users(
        &self,
        _include_self: bool,
        include_disabled: bool,
    ) -> Result<Vec<MamUser>, MamError> {
        let mut state = self.lock()?;
        state.enter(MamOperation::ListUsers)?;
        Ok(state
            .users
            .iter()
            .filter(|user| include_disabled || !user.disabled)
            .cloned()
            .collect())
    }
}
