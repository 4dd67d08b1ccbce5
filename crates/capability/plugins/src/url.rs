//! URL 插件描述。
//!
//! 路由模式沿用宿主的正则写法，`reverse` 只处理 `(?P<slug>...)` 这一种命名分组。

use portal_config::PluginConfig;
use serde::Serialize;

use crate::PLACEHOLDER_GUID;

/// 单条路由。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRoute {
    pub name: &'static str,
    pub pattern: &'static str,
    pub template: &'static str,
}

const ROUTES: &[UrlRoute] = &[
    UrlRoute {
        name: "my_plugin_helloworld",
        pattern: "^helloworld/$",
        template: "portalplugintemplate/hello_world.html",
    },
    UrlRoute {
        name: "my_plugin_models",
        pattern: "^modelsandforms/$",
        template: "portalplugintemplate/my_plugin_models_view.html",
    },
    UrlRoute {
        name: "add_my_plugin_model",
        pattern: "^modelsandforms/add/$",
        template: "portalplugintemplate/my_plugin_model_view.html",
    },
    UrlRoute {
        name: "delete_my_plugin_model",
        pattern: "^modelsandforms/delete/$",
        template: "admin/confirm_delete.html",
    },
    UrlRoute {
        name: "my_plugin_model",
        pattern: r"^modelsandforms/(?P<slug>[-\w\s]+)/$",
        template: "portalplugintemplate/my_plugin_model_view.html",
    },
    UrlRoute {
        name: "mam_backend_view",
        pattern: "^mambackend/$",
        template: "portalplugintemplate/mam_backend_view.html",
    },
];

/// URL 插件：在宿主中挂载一组路由。
#[derive(Debug, Clone, Serialize)]
pub struct UrlPlugin {
    pub name: String,
    pub urlpattern: String,
    pub namespace: String,
    pub plugin_guid: String,
    pub routes: Vec<UrlRoute>,
}

impl UrlPlugin {
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            name: "MyPluginURL".to_string(),
            urlpattern: config.plugin_url_pattern.clone(),
            namespace: config.plugin_namespace.clone(),
            plugin_guid: PLACEHOLDER_GUID.to_string(),
            routes: ROUTES.to_vec(),
        }
    }

    pub fn route(&self, name: &str) -> Option<&UrlRoute> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// 由路由名生成站内路径，例如 `/myplugin/modelsandforms/3/`。
    ///
    /// 带 slug 的路由缺少 slug 时返回 None。
    pub fn reverse(&self, name: &str, slug: Option<&str>) -> Option<String> {
        let route = self.route(name)?;
        let prefix = strip_anchors(&self.urlpattern);
        let mut path = strip_anchors(route.pattern).to_string();
        if let Some(start) = path.find("(?P<slug>") {
            let end = start + path[start..].find(")/")? + 1;
            path.replace_range(start..end, slug?);
        }
        Some(format!("/{prefix}{path}"))
    }
}

fn strip_anchors(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    pattern.strip_suffix('$').unwrap_or(pattern)
}
