//! 类型化信号总线。
//!
//! 取代宿主的全局信号：监听器在组合根显式订阅，
//! `publish` 在调用方任务上按注册顺序同步执行全部处理器。

pub mod builder;
pub mod bus;
pub mod error;

pub use builder::SignalBusBuilder;
pub use bus::{SignalBus, SignalEnvelope, SignalHandler};
pub use error::SignalError;
