//! # Portal Plugins 模块
//!
//! 插件向宿主声明的扩展点描述。宿主负责模板渲染与路由分发，本 crate 只给出描述数据。
//!
//! - `url`：URL 插件（路由前缀、命名空间、路由表）
//! - `block`：模板块插件（按 pluginblock 标签名挂载）
//! - `player_options`：视频播放器选项覆盖（脚本块）
//! - `widget`：仪表盘组件
//! - `registry`：插件注册表与默认插件集合

pub mod block;
pub mod error;
pub mod player_options;
pub mod registry;
pub mod url;
pub mod widget;

pub use block::{BlockOutput, BlockPlugin, TemplateBlock};
pub use error::PluginError;
pub use player_options::{
    ANNOTATION_VIEW_JS, AnnotationToolCustomSubtitles, ItemPageCustomSubtitles,
    ItemPageDisableCreatePoster, ItemPageDisableSubtitles, MEDIA_VIEW_PLAYER_OPTIONS_JS,
};
pub use registry::PluginRegistry;
pub use url::{UrlPlugin, UrlRoute};
pub use widget::{
    ConfigField, ConfigFieldKind, ConfigTestWidget, DEFAULT_WIDGET_TEMPLATE, DashboardWidget,
    DummyWidget, HelloWidget, RefreshWidget, TextWidget, TextWidgetForcedConfig, WidgetData,
};

/// 插件 GUID 占位值（发布前替换）。
pub const PLACEHOLDER_GUID: &str = "replace-with-guid";

/// 插件模板目录（位于主题目录下）。
pub const TEMPLATE_DIR: &str = "templates/plugins/PortalPluginTemplate";
