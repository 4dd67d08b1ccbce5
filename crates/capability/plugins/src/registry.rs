//! 插件注册表。
//!
//! 同一个 pluginblock 标签可以挂多个块，按注册顺序输出。

use portal_config::PluginConfig;
use std::sync::Arc;
use tracing::debug;

use crate::block::{BlockOutput, BlockPlugin, TemplateBlock};
use crate::error::PluginError;
use crate::player_options::{
    AnnotationToolCustomSubtitles, ItemPageCustomSubtitles, ItemPageDisableCreatePoster,
};
use crate::url::UrlPlugin;
use crate::widget::{
    ConfigTestWidget, DashboardWidget, DummyWidget, HelloWidget, RefreshWidget, TextWidget,
    TextWidgetForcedConfig,
};

pub struct PluginRegistry {
    url: UrlPlugin,
    blocks: Vec<Arc<dyn BlockPlugin>>,
    widgets: Vec<Arc<dyn DashboardWidget>>,
}

impl PluginRegistry {
    pub fn new(url: UrlPlugin) -> Self {
        debug!(
            target: "portal.plugins",
            name = %url.name,
            namespace = %url.namespace,
            "url plugin initiated"
        );
        Self {
            url,
            blocks: Vec::new(),
            widgets: Vec::new(),
        }
    }

    /// 默认插件集合。
    ///
    /// `ItemPageDisableSubtitles` 与 `ItemPageCustomSubtitles` 互斥，这里只注册后者。
    pub fn with_defaults(config: &PluginConfig) -> Result<Self, PluginError> {
        let mut registry = Self::new(UrlPlugin::from_config(config));
        registry.register_block(Arc::new(TemplateBlock::admin_left_panel(
            &config.default_theme,
        )))?;
        registry.register_block(Arc::new(TemplateBlock::navigation_admin(
            &config.default_theme,
        )))?;
        registry.register_block(Arc::new(ItemPageCustomSubtitles))?;
        registry.register_block(Arc::new(ItemPageDisableCreatePoster))?;
        registry.register_block(Arc::new(AnnotationToolCustomSubtitles))?;

        registry.register_widget(Arc::new(HelloWidget))?;
        registry.register_widget(Arc::new(DummyWidget))?;
        registry.register_widget(Arc::new(TextWidget))?;
        registry.register_widget(Arc::new(TextWidgetForcedConfig))?;
        registry.register_widget(Arc::new(RefreshWidget::new()))?;
        registry.register_widget(Arc::new(ConfigTestWidget))?;
        Ok(registry)
    }

    pub fn register_block(&mut self, block: Arc<dyn BlockPlugin>) -> Result<(), PluginError> {
        if block.plugin_guid().trim().is_empty() {
            return Err(PluginError::EmptyGuid(block.name().to_string()));
        }
        let duplicate = self.blocks.iter().any(|existing| {
            existing.name() == block.name() && existing.plugin_guid() == block.plugin_guid()
        });
        if duplicate {
            return Err(PluginError::DuplicateBlock(
                block.name().to_string(),
                block.plugin_guid().to_string(),
            ));
        }
        debug!(
            target: "portal.plugins",
            tag = block.name(),
            guid = block.plugin_guid(),
            "block plugin registered"
        );
        self.blocks.push(block);
        Ok(())
    }

    pub fn register_widget(
        &mut self,
        widget: Arc<dyn DashboardWidget>,
    ) -> Result<(), PluginError> {
        if widget.plugin_guid().trim().is_empty() {
            return Err(PluginError::EmptyGuid(widget.name().to_string()));
        }
        if self.widget(widget.name()).is_some() {
            return Err(PluginError::DuplicateWidgetName(widget.name().to_string()));
        }
        if self
            .widgets
            .iter()
            .any(|existing| existing.plugin_guid() == widget.plugin_guid())
        {
            return Err(PluginError::DuplicateWidgetGuid(
                widget.plugin_guid().to_string(),
            ));
        }
        debug!(
            target: "portal.plugins",
            name = widget.name(),
            guid = widget.plugin_guid(),
            "dashboard widget registered"
        );
        self.widgets.push(widget);
        Ok(())
    }

    pub fn url_plugin(&self) -> &UrlPlugin {
        &self.url
    }

    pub fn blocks_for(&self, tag: &str) -> Vec<Arc<dyn BlockPlugin>> {
        self.blocks
            .iter()
            .filter(|block| block.name() == tag)
            .cloned()
            .collect()
    }

    /// 渲染某个标签下的全部块。
    pub fn render_blocks(&self, tag: &str, theme: Option<&str>) -> Vec<BlockOutput> {
        self.blocks
            .iter()
            .filter(|block| block.name() == tag)
            .map(|block| block.render(theme))
            .collect()
    }

    pub fn widget(&self, name: &str) -> Option<Arc<dyn DashboardWidget>> {
        self.widgets
            .iter()
            .find(|widget| widget.name() == name)
            .cloned()
    }

    pub fn widgets(&self) -> &[Arc<dyn DashboardWidget>] {
        &self.widgets
    }
}
