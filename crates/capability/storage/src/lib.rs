//! # Portal Storage 模块
//!
//! 插件自有数据（"plugin model"）的存储抽象层。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`PluginModelStore` 异步 Trait
//! 2. **数据模型层** (`models.rs`)：记录与创建/更新输入
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：字段必填与长度校验
//! 5. **实现层** (`in_memory/`)：内存存储实现（测试与演示）
//!
//! 宿主 ORM 与表单不在本 workspace 内；校验规则与宿主表单保持一致：
//! `name` 必填且不超过 255 字符，`external_id` 必填且不超过 64 字符，
//! 编辑表单不允许修改 `external_id`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use portal_storage::{InMemoryPluginModelStore, PluginModelCreate, PluginModelStore};
//!
//! let store = InMemoryPluginModelStore::new();
//! let record = store
//!     .create_model(PluginModelCreate {
//!         name: "Archive rule".to_string(),
//!         description: None,
//!         external_id: "EXT-1".to_string(),
//!     })
//!     .await?;
//! assert_eq!(record.to_string(), "Archive rule (EXT-1)");
//! ```

pub mod error;
pub mod in_memory;
pub mod models;
pub mod traits;
pub mod validation;

pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::InMemoryPluginModelStore;
