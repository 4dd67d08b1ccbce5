//! # Portal MAM 客户端
//!
//! 远程 MAM API 的调用抽象。插件只依赖 [`MamClient`] Trait，
//! 真实的传输与认证由宿主提供（不在本 workspace 内）。
//!
//! - [`client`]：`MamClient` Trait 与操作枚举
//! - [`error`]：`MamError`
//! - [`in_memory`]：内存实现（测试、本地演示，支持故障注入）
//! - [`backend_info`]：后台信息页使用的查询辅助函数
//!
//! 所有调用都返回 `Result`，失败只携带可记录的错误信息，不会 panic。

pub mod backend_info;
pub mod client;
pub mod error;
pub mod in_memory;

pub use backend_info::fetch_backend_users;
pub use client::{MamClient, MamOperation};
pub use error::MamError;
pub use in_memory::{CollectionRecord, InMemoryMamClient};
