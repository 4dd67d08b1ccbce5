//! 仪表盘组件。
//!
//! 宿主把组件模板所需的 `render_data` 与用户保存的 `settings` 都以 JSON 对象传入。
//! `configurable` 为 false 的组件不需要实现 `config_fields` 与 `force_show_config`。

use serde::Serialize;
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// 组件渲染数据 / 设置。
pub type WidgetData = Map<String, Value>;

/// 宿主提供的默认组件模板。
pub const DEFAULT_WIDGET_TEMPLATE: &str = "dashboard/widget_default.html";

/// 配置表单字段类型。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigFieldKind {
    Boolean,
    NullBoolean,
    Char { max_length: Option<usize> },
    Textarea { max_length: Option<usize>, rows: u32 },
    Choice { choices: Vec<(i64, &'static str)> },
    Email,
    Float,
    Integer { min_value: Option<i64> },
    Url,
}

/// 配置表单字段。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ConfigFieldKind,
    pub required: bool,
    pub initial: Option<Value>,
}

impl ConfigField {
    fn new(name: &'static str, label: &'static str, kind: ConfigFieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            initial: None,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }
}

/// 仪表盘组件接口
pub trait DashboardWidget: Send + Sync {
    fn name(&self) -> &str;

    fn plugin_guid(&self) -> &str;

    fn template_name(&self) -> &str;

    fn configurable(&self) -> bool;

    /// 组件列表中显示的标题
    fn list_title(&self) -> &str;

    /// 在宿主给出的渲染数据上补充本组件的内容
    fn render_data(&self, data: WidgetData, settings: &WidgetData) -> WidgetData;

    fn config_fields(&self) -> Vec<ConfigField> {
        Vec::new()
    }

    /// 为 true 时宿主直接显示配置界面
    fn force_show_config(&self, _settings: &WidgetData) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HelloWidget;

impl DashboardWidget for HelloWidget {
    fn name(&self) -> &str {
        "HelloWidget"
    }

    fn plugin_guid(&self) -> &str {
        "2BFADB52-56B8-47B3-BA63-1383CD42F678"
    }

    fn template_name(&self) -> &str {
        DEFAULT_WIDGET_TEMPLATE
    }

    fn configurable(&self) -> bool {
        false
    }

    fn list_title(&self) -> &str {
        "Hello widget"
    }

    fn render_data(&self, mut data: WidgetData, _settings: &WidgetData) -> WidgetData {
        data.insert("content".to_string(), Value::from("Hello world!"));
        data
    }
}

/// 使用自定义模板、不补充数据的示例组件。
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyWidget;

impl DashboardWidget for DummyWidget {
    fn name(&self) -> &str {
        "DummyWidget"
    }

    fn plugin_guid(&self) -> &str {
        "4DA92DF6-9579-4813-8BEF-525AE897D750"
    }

    fn template_name(&self) -> &str {
        "dummy_widget.html"
    }

    fn configurable(&self) -> bool {
        false
    }

    fn list_title(&self) -> &str {
        "Dummy widget"
    }

    fn render_data(&self, data: WidgetData, _settings: &WidgetData) -> WidgetData {
        data
    }
}

const TEXT_WIDGET_PROMPT: &str =
    "You can configure this text to by clicking the wrench in the upper right corner.";

/// 标题与正文均可配置的文本组件。
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWidget;

fn render_text(mut data: WidgetData, settings: &WidgetData) -> WidgetData {
    if let Some(title) = settings.get("title") {
        data.insert("title".to_string(), title.clone());
    }
    let content = settings
        .get("text")
        .cloned()
        .unwrap_or_else(|| Value::from(TEXT_WIDGET_PROMPT));
    data.insert("content".to_string(), content);
    data
}

fn text_config_fields(title: &str) -> Vec<ConfigField> {
    vec![
        ConfigField::new(
            "title",
            "Widget title",
            ConfigFieldKind::Char {
                max_length: Some(100),
            },
        )
        .initial(title),
        ConfigField::new(
            "text",
            "Widget text",
            ConfigFieldKind::Textarea {
                max_length: Some(10000),
                rows: 5,
            },
        ),
    ]
}

impl DashboardWidget for TextWidget {
    fn name(&self) -> &str {
        "TextWidget"
    }

    fn plugin_guid(&self) -> &str {
        "DF194309-B4A0-4855-A362-D99E171044D9"
    }

    fn template_name(&self) -> &str {
        DEFAULT_WIDGET_TEMPLATE
    }

    fn configurable(&self) -> bool {
        true
    }

    fn list_title(&self) -> &str {
        "Text widget"
    }

    fn render_data(&self, data: WidgetData, settings: &WidgetData) -> WidgetData {
        render_text(data, settings)
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        text_config_fields(self.list_title())
    }
}

/// 文本组件：正文为空时强制显示配置界面。
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWidgetForcedConfig;

impl DashboardWidget for TextWidgetForcedConfig {
    fn name(&self) -> &str {
        "TextWidgetForcedConfig"
    }

    fn plugin_guid(&self) -> &str {
        "A9F34DA4-7E75-4CD6-8CBC-FDD4973A2989"
    }

    fn template_name(&self) -> &str {
        DEFAULT_WIDGET_TEMPLATE
    }

    fn configurable(&self) -> bool {
        true
    }

    fn list_title(&self) -> &str {
        "Text widget forced config"
    }

    fn render_data(&self, data: WidgetData, settings: &WidgetData) -> WidgetData {
        render_text(data, settings)
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        text_config_fields(TextWidget.list_title())
    }

    fn force_show_config(&self, settings: &WidgetData) -> bool {
        match settings.get("text") {
            None | Some(Value::Null) => true,
            Some(Value::String(text)) => text.is_empty(),
            Some(_) => false,
        }
    }
}

/// 定时刷新的组件，模板按 `refresh_interval`（秒）重新加载。
#[derive(Debug, Clone, Copy)]
pub struct RefreshWidget {
    default_interval: u64,
}

impl RefreshWidget {
    pub const DEFAULT_INTERVAL_SECONDS: u64 = 10;

    pub fn new() -> Self {
        Self {
            default_interval: Self::DEFAULT_INTERVAL_SECONDS,
        }
    }

    pub fn default_interval(&self) -> u64 {
        self.default_interval
    }
}

impl Default for RefreshWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardWidget for RefreshWidget {
    fn name(&self) -> &str {
        "RefreshWidget"
    }

    fn plugin_guid(&self) -> &str {
        "3622B952-E9C0-4429-BD00-65B6958322BF"
    }

    fn template_name(&self) -> &str {
        "refresh_widget.html"
    }

    fn configurable(&self) -> bool {
        true
    }

    fn list_title(&self) -> &str {
        "Refresh widget"
    }

    fn render_data(&self, mut data: WidgetData, settings: &WidgetData) -> WidgetData {
        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        data.insert(
            "content".to_string(),
            Value::from(format!("Time on server: {now_secs}")),
        );
        let interval = settings
            .get("refresh_interval")
            .cloned()
            .unwrap_or_else(|| Value::from(self.default_interval));
        data.insert("refresh_interval".to_string(), interval);
        data
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::new(
                "refresh_interval",
                "Refresh interval (seconds):",
                ConfigFieldKind::Integer { min_value: Some(1) },
            )
            .initial(self.default_interval),
        ]
    }
}

/// 覆盖所有支持的配置字段类型，渲染时列出已保存的设置值及其类型。
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigTestWidget;

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

impl DashboardWidget for ConfigTestWidget {
    fn name(&self) -> &str {
        "ConfigTestWidget"
    }

    fn plugin_guid(&self) -> &str {
        "31C1A0C7-3B26-44C3-9881-0D74314C9BF0"
    }

    fn template_name(&self) -> &str {
        DEFAULT_WIDGET_TEMPLATE
    }

    fn configurable(&self) -> bool {
        true
    }

    fn list_title(&self) -> &str {
        "Configuration test widget"
    }

    fn render_data(&self, mut data: WidgetData, settings: &WidgetData) -> WidgetData {
        let mut entries: Vec<(&String, &Value)> = settings.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut content = String::from("All settings values:");
        for (key, value) in entries {
            content.push_str(&format!(
                "\n\"{key}\": {value} ({})",
                value_type_name(value)
            ));
        }
        content.push_str(&format!("\nn={}", settings.len()));
        data.insert("content".to_string(), Value::from(content));
        data
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::new("boolean", "BooleanField", ConfigFieldKind::Boolean).optional(),
            ConfigField::new("char", "CharField", ConfigFieldKind::Char { max_length: None })
                .optional(),
            ConfigField::new(
                "choice",
                "ChoiceField",
                ConfigFieldKind::Choice {
                    choices: vec![
                        (1, "first option"),
                        (2, "second option"),
                        (3, "third option"),
                    ],
                },
            ),
            ConfigField::new("email", "EmailField", ConfigFieldKind::Email).optional(),
            ConfigField::new("float", "FloatField", ConfigFieldKind::Float).optional(),
            ConfigField::new(
                "integer",
                "IntegerField",
                ConfigFieldKind::Integer { min_value: None },
            )
            .initial(1),
            ConfigField::new("null_boolean", "NullBooleanField", ConfigFieldKind::NullBoolean)
                .optional(),
            ConfigField::new("url", "URLField", ConfigFieldKind::Url).optional(),
        ]
    }
}
