//! MAM 调用错误类型

/// 远程调用失败（只用于记录日志，调用方不据此重试）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MamError {
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl MamError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
