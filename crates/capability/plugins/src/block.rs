//! 模板块插件。
//!
//! 宿主模板中的 `{% pluginblock "<tag>" <theme> %}` 会收集所有同名块的输出。

use serde::Serialize;

use crate::{PLACEHOLDER_GUID, TEMPLATE_DIR};

/// 块插件输出：模板路径或内联脚本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BlockOutput {
    Template { guid: String, template: String },
    Script { guid: String, string: String },
}

impl BlockOutput {
    pub fn guid(&self) -> &str {
        match self {
            BlockOutput::Template { guid, .. } | BlockOutput::Script { guid, .. } => guid,
        }
    }
}

/// 块插件接口
pub trait BlockPlugin: Send + Sync {
    /// pluginblock 标签名
    fn name(&self) -> &str;

    fn plugin_guid(&self) -> &str;

    /// 渲染输出；`theme` 为标签上给出的主题，缺省时由实现回退到默认主题
    fn render(&self, theme: Option<&str>) -> BlockOutput;
}

/// 指向主题目录下模板文件的块。
#[derive(Debug, Clone)]
pub struct TemplateBlock {
    name: String,
    plugin_guid: String,
    file: String,
    default_theme: String,
}

impl TemplateBlock {
    pub fn new(
        name: impl Into<String>,
        plugin_guid: impl Into<String>,
        file: impl Into<String>,
        default_theme: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            plugin_guid: plugin_guid.into(),
            file: file.into(),
            default_theme: default_theme.into(),
        }
    }

    /// 管理页左侧面板底部入口。
    pub fn admin_left_panel(default_theme: &str) -> Self {
        Self::new(
            "AdminLeftPanelBottomPanePlugin",
            PLACEHOLDER_GUID,
            "admin_leftpanel_entry.html",
            default_theme,
        )
    }

    /// 管理导航栏入口。
    pub fn navigation_admin(default_theme: &str) -> Self {
        Self::new(
            "NavigationAdminPlugin",
            PLACEHOLDER_GUID,
            "navigation_admin.html",
            default_theme,
        )
    }
}

impl BlockPlugin for TemplateBlock {
    fn name(&self) -> &str {
        &self.name
    }

    fn plugin_guid(&self) -> &str {
        &self.plugin_guid
    }

    fn render(&self, theme: Option<&str>) -> BlockOutput {
        let theme = theme
            .filter(|theme| !theme.trim().is_empty())
            .unwrap_or(&self.default_theme);
        BlockOutput::Template {
            guid: self.plugin_guid.clone(),
            template: format!("{theme}/{TEMPLATE_DIR}/{}", self.file),
        }
    }
}
