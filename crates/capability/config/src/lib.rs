//! 插件运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 插件运行配置。
#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub last_visited_window_seconds: u64,
    pub last_visited_collection_name: String,
    pub collection_marker_field: String,
    pub collection_marker_value: String,
    pub default_theme: String,
    pub plugin_url_pattern: String,
    pub plugin_namespace: String,
    pub log_level: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            last_visited_window_seconds: 30,
            last_visited_collection_name: "lastVisitedItems".to_string(),
            // 以 _hidden 结尾的字段不会在 Portal 中渲染
            collection_marker_field: "portal_collectiontype_hidden".to_string(),
            collection_marker_value: "lastVisitedItems".to_string(),
            default_theme: "sand".to_string(),
            plugin_url_pattern: "^myplugin/".to_string(),
            plugin_namespace: "myplugin".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PluginConfig {
    /// 从环境变量读取配置（均为可选，缺省取默认值）。
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let last_visited_window_seconds = read_u64_with_default(
            "PORTAL_LAST_VISITED_WINDOW_SECONDS",
            defaults.last_visited_window_seconds,
        )?;
        if last_visited_window_seconds == 0 {
            return Err(ConfigError::Invalid(
                "PORTAL_LAST_VISITED_WINDOW_SECONDS".to_string(),
                "0".to_string(),
            ));
        }
        let last_visited_collection_name = read_string_with_default(
            "PORTAL_LAST_VISITED_COLLECTION_NAME",
            defaults.last_visited_collection_name,
        );
        let collection_marker_field = read_string_with_default(
            "PORTAL_COLLECTION_MARKER_FIELD",
            defaults.collection_marker_field,
        );
        let collection_marker_value = read_string_with_default(
            "PORTAL_COLLECTION_MARKER_VALUE",
            defaults.collection_marker_value,
        );
        let default_theme = read_string_with_default("PORTAL_DEFAULT_THEME", defaults.default_theme);
        let plugin_url_pattern =
            read_string_with_default("PORTAL_PLUGIN_URL_PATTERN", defaults.plugin_url_pattern);
        let plugin_namespace =
            read_string_with_default("PORTAL_PLUGIN_NAMESPACE", defaults.plugin_namespace);
        let log_level = read_string_with_default("PORTAL_LOG_LEVEL", defaults.log_level);

        Ok(Self {
            last_visited_window_seconds,
            last_visited_collection_name,
            collection_marker_field,
            collection_marker_value,
            default_theme,
            plugin_url_pattern,
            plugin_namespace,
            log_level,
        })
    }

    /// 批量写入窗口（毫秒）。
    pub fn last_visited_window_ms(&self) -> i64 {
        i64::try_from(self.last_visited_window_seconds.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(default),
    };
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_string_with_default(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default,
    }
}
