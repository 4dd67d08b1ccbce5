/// 插件注册错误。
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("duplicate block tag={0} guid={1}")]
    DuplicateBlock(String, String),
    #[error("duplicate widget name={0}")]
    DuplicateWidgetName(String),
    #[error("duplicate widget guid={0}")]
    DuplicateWidgetGuid(String),
    #[error("empty plugin guid for {0}")]
    EmptyGuid(String),
}
