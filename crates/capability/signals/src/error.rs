/// 信号总线错误。
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("empty subscriber_id")]
    EmptySubscriber,
    #[error("subscriber_id={0} has unknown signal_type={1}")]
    UnknownSignalType(&'static str, &'static str),
    #[error("duplicate subscription subscriber_id={0} signal_type={1}")]
    DuplicateSubscription(&'static str, &'static str),
    #[error("handler error: {0}")]
    Handler(String),
}
