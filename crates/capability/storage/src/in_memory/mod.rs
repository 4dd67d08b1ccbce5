//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - PluginModelStore: InMemoryPluginModelStore

pub mod plugin_model;

pub use plugin_model::*;
