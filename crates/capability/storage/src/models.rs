//! 数据模型
//!
//! - PluginModelRecord：插件模型记录
//! - PluginModelCreate：新增输入
//! - PluginModelUpdate：编辑输入（不含 external_id）

use serde::{Deserialize, Serialize};

/// 插件模型记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginModelRecord {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub external_id: String,
}

impl std::fmt::Display for PluginModelRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.external_id)
    }
}

/// 新增插件模型。
#[derive(Debug, Clone, Deserialize)]
pub struct PluginModelCreate {
    pub name: String,
    pub description: Option<String>,
    pub external_id: String,
}

/// 编辑插件模型（None 表示不修改）。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginModelUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
