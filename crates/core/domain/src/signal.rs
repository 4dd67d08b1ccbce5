use crate::metadata::MetadataDocument;

/// 写条目元数据的 API 方法名。
pub const SET_ITEM_METADATA: &str = "setItemMetadata";

/// 宿主发出的信号。
#[derive(Debug, Clone)]
pub enum Signal {
    /// 条目页被访问（宿主执行 getItem 时触发）。
    ItemVisited { item_id: String },
    /// 条目即将被修改。
    PreModify {
        item_id: String,
        method: String,
        metadata_document: MetadataDocument,
    },
}

impl Signal {
    pub const ITEM_VISITED: &'static str = "item.visited";
    pub const PRE_MODIFY: &'static str = "item.pre_modify";

    /// 所有已知信号类型。
    pub const KNOWN_TYPES: [&'static str; 2] = [Self::ITEM_VISITED, Self::PRE_MODIFY];

    pub fn item_visited(item_id: impl Into<String>) -> Self {
        Signal::ItemVisited {
            item_id: item_id.into(),
        }
    }

    pub fn signal_type(&self) -> &'static str {
        match self {
            Signal::ItemVisited { .. } => Self::ITEM_VISITED,
            Signal::PreModify { .. } => Self::PRE_MODIFY,
        }
    }

    pub fn item_id(&self) -> &str {
        match self {
            Signal::ItemVisited { item_id } => item_id,
            Signal::PreModify { item_id, .. } => item_id,
        }
    }
}
