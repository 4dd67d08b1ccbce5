use portal_config::{ConfigError, PluginConfig};

#[test]
fn defaults_match_portal_conventions() {
    let config = PluginConfig::default();
    assert_eq!(config.last_visited_window_seconds, 30);
    assert_eq!(config.last_visited_window_ms(), 30_000);
    assert_eq!(config.collection_marker_field, "portal_collectiontype_hidden");
    assert_eq!(config.collection_marker_value, "lastVisitedItems");
    assert_eq!(config.default_theme, "sand");
}

// 环境变量为进程级共享状态，全部断言放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("PORTAL_LAST_VISITED_WINDOW_SECONDS", "45");
        std::env::set_var("PORTAL_DEFAULT_THEME", "dark");
        std::env::set_var("PORTAL_PLUGIN_NAMESPACE", "visits");
    }

    let config = PluginConfig::from_env().expect("config");
    assert_eq!(config.last_visited_window_seconds, 45);
    assert_eq!(config.default_theme, "dark");
    assert_eq!(config.plugin_namespace, "visits");
    assert_eq!(config.last_visited_collection_name, "lastVisitedItems");

    unsafe {
        std::env::set_var("PORTAL_LAST_VISITED_WINDOW_SECONDS", "soon");
    }
    let err = PluginConfig::from_env().expect_err("non-numeric window");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "PORTAL_LAST_VISITED_WINDOW_SECONDS"));

    unsafe {
        std::env::set_var("PORTAL_LAST_VISITED_WINDOW_SECONDS", "0");
    }
    assert!(PluginConfig::from_env().is_err());

    unsafe {
        std::env::remove_var("PORTAL_LAST_VISITED_WINDOW_SECONDS");
        std::env::remove_var("PORTAL_DEFAULT_THEME");
        std::env::remove_var("PORTAL_PLUGIN_NAMESPACE");
    }
    let config = PluginConfig::from_env().expect("config");
    assert_eq!(config.last_visited_window_seconds, 30);
}
