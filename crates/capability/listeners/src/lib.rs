//! 插件信号监听器。
//!
//! - [`LastVisitedItems`]：把被访问的条目按时间窗口批量写入"最近访问"收藏集
//! - [`PreMetadataUpdate`]：元数据提交前比对表单与当前值，记录将被修改的字段

pub mod clock;
pub mod last_visited;
pub mod pre_metadata;

pub use clock::{Clock, ManualClock, SystemClock};
pub use last_visited::{
    LastVisitedConfig, LastVisitedItems, VisitOutcome, resolve_or_create_collection,
};
pub use pre_metadata::{PreMetadataUpdate, detect_changes};
