//! MAM 客户端 Trait 定义
//!
//! 设计原则：
//! - 所有接口返回 MamError，不抛出
//! - 使用 async_trait 支持动态分发（`Arc<dyn MamClient>`）
//! - 所有调用以管理员身份执行（不设置 runas）

use crate::error::MamError;
use async_trait::async_trait;
use domain::{ItemMetadata, MamUser};

/// MAM 操作种类（用于调用记录与故障注入）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MamOperation {
    SearchCollections,
    CreateCollection,
    SetCollectionField,
    CreateLibrary,
    AddLibraryToCollection,
    GetItemMetadata,
    ListUsers,
}

/// 远程 MAM API 客户端接口
#[async_trait]
pub trait MamClient: Send + Sync {
    /// 按元数据字段搜索收藏集，返回命中的收藏集 ID
    async fn search_collections(&self, field: &str, value: &str)
    -> Result<Vec<String>, MamError>;

    /// 创建收藏集，返回新 ID
    async fn create_collection(&self, name: &str) -> Result<String, MamError>;

    /// 设置收藏集的单个元数据字段值
    async fn set_collection_field(
        &self,
        collection_id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), MamError>;

    /// 由条目 ID 列表创建 library（批量挂载单元），返回 library ID
    async fn create_library_from_items(&self, item_ids: &[String]) -> Result<String, MamError>;

    /// 将 library 挂载到收藏集
    async fn add_library_to_collection(
        &self,
        collection_id: &str,
        library_id: &str,
    ) -> Result<(), MamError>;

    /// 读取条目当前的自定义元数据
    async fn get_item_metadata(&self, item_id: &str) -> Result<ItemMetadata, MamError>;

    /// 列出当前身份可见的用户
    async fn list_users(
        &self,
        include_self: bool,
        include_disabled: bool,
    ) -> Result<Vec<MamUser>, MamError>;
}
