use portal_config::PluginConfig;
use portal_plugins::{
    ConfigTestWidget, DashboardWidget, HelloWidget, RefreshWidget, TextWidget,
    TextWidgetForcedConfig, UrlPlugin, WidgetData,
};
use serde_json::{Value, json};

fn object(value: Value) -> WidgetData {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn hello_widget_sets_content() {
    let data = HelloWidget.render_data(WidgetData::new(), &WidgetData::new());
    assert_eq!(data.get("content"), Some(&json!("Hello world!")));
    assert!(!HelloWidget.configurable());
}

#[test]
fn text_widget_uses_settings_or_prompt() {
    let data = TextWidget.render_data(
        object(json!({"title": "old"})),
        &object(json!({"title": "Notes", "text": "remember the backups"})),
    );
    assert_eq!(data.get("title"), Some(&json!("Notes")));
    assert_eq!(data.get("content"), Some(&json!("remember the backups")));

    let data = TextWidget.render_data(object(json!({"title": "old"})), &WidgetData::new());
    assert_eq!(data.get("title"), Some(&json!("old")));
    let content = data.get("content").and_then(Value::as_str).expect("content");
    assert!(content.contains("clicking the wrench"));
}

#[test]
fn forced_config_widget_waits_for_text() {
    let widget = TextWidgetForcedConfig;
    assert!(widget.force_show_config(&WidgetData::new()));
    assert!(widget.force_show_config(&object(json!({"text": ""}))));
    assert!(!widget.force_show_config(&object(json!({"text": "hi"}))));
    assert!(!TextWidget.force_show_config(&WidgetData::new()));
}

#[test]
fn refresh_widget_defaults_interval() {
    let widget = RefreshWidget::new();
    let data = widget.render_data(WidgetData::new(), &WidgetData::new());
    assert_eq!(data.get("refresh_interval"), Some(&json!(10)));
    let content = data.get("content").and_then(Value::as_str).expect("content");
    assert!(content.starts_with("Time on server: "));

    let data = widget.render_data(WidgetData::new(), &object(json!({"refresh_interval": 3})));
    assert_eq!(data.get("refresh_interval"), Some(&json!(3)));
}

#[test]
fn config_test_widget_lists_sorted_settings() {
    let settings = object(json!({"integer": 1, "boolean": true, "char": "x", "float": 1.5}));
    let data = ConfigTestWidget.render_data(WidgetData::new(), &settings);
    let content = data.get("content").and_then(Value::as_str).expect("content");
    assert_eq!(
        content,
        "All settings values:\n\"boolean\": true (bool)\n\"char\": \"x\" (str)\n\"float\": 1.5 (float)\n\"integer\": 1 (int)\nn=4"
    );
    assert_eq!(ConfigTestWidget.config_fields().len(), 8);
}

#[test]
fn url_plugin_reverses_routes_under_prefix() {
    let plugin = UrlPlugin::from_config(&PluginConfig::default());
    assert_eq!(plugin.urlpattern, "^myplugin/");
    assert_eq!(plugin.routes.len(), 6);
    assert_eq!(
        plugin.reverse("my_plugin_helloworld", None).as_deref(),
        Some("/myplugin/helloworld/")
    );
    assert_eq!(
        plugin.reverse("my_plugin_model", Some("3")).as_deref(),
        Some("/myplugin/modelsandforms/3/")
    );
    assert!(plugin.reverse("my_plugin_model", None).is_none());
    assert_eq!(
        plugin
            .route("delete_my_plugin_model")
            .map(|route| route.template),
        Some("admin/confirm_delete.html")
    );
}
