//! 存储接口 Trait 定义
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{PluginModelCreate, PluginModelRecord, PluginModelUpdate};
use async_trait::async_trait;

/// 插件模型存储接口
///
/// 提供插件模型的增删改查。
#[async_trait]
pub trait PluginModelStore: Send + Sync {
    /// 列出全部模型（按 ID 升序）
    async fn list_models(&self) -> Result<Vec<PluginModelRecord>, StorageError>;

    /// 查找指定模型
    async fn find_model(&self, id: u64) -> Result<Option<PluginModelRecord>, StorageError>;

    /// 新增模型
    async fn create_model(
        &self,
        input: PluginModelCreate,
    ) -> Result<PluginModelRecord, StorageError>;

    /// 编辑模型，不存在时返回 None
    async fn update_model(
        &self,
        id: u64,
        update: PluginModelUpdate,
    ) -> Result<Option<PluginModelRecord>, StorageError>;

    /// 批量删除；任一 ID 不存在则整体失败，不删除任何记录
    async fn delete_models(&self, ids: &[u64]) -> Result<usize, StorageError>;
}
