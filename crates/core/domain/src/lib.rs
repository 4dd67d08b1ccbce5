pub mod metadata;
pub mod signal;

pub use metadata::{FieldChange, ItemMetadata, MetadataDocument, MetadataField, Timespan};
pub use signal::{Signal, SET_ITEM_METADATA};

/// MAM 用户（后台信息页使用）。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MamUser {
    pub username: String,
    pub real_name: Option<String>,
    pub disabled: bool,
}

impl MamUser {
    /// 构造启用状态的用户。
    pub fn new(username: impl Into<String>, real_name: Option<String>) -> Self {
        Self {
            username: username.into(),
            real_name,
            disabled: false,
        }
    }
}
