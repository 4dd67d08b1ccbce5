//! 插件宿主进程：组装 MAM 客户端、监听器、信号总线与插件注册表，从 stdin 读取命令。

mod commands;

use commands::{Command, parse_command};
use domain::{ItemMetadata, MamUser, MetadataField};
use portal_config::PluginConfig;
use portal_listeners::{LastVisitedConfig, LastVisitedItems, PreMetadataUpdate, SystemClock};
use portal_mam::{InMemoryMamClient, MamClient, fetch_backend_users};
use portal_plugins::PluginRegistry;
use portal_signals::{SignalBus, SignalBusBuilder};
use portal_storage::{InMemoryPluginModelStore, PluginModelCreate, PluginModelStore};
use portal_telemetry::{init_tracing, metrics};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

struct Host {
    bus: SignalBus,
    client: Arc<dyn MamClient>,
    plugins: PluginRegistry,
    models: Arc<dyn PluginModelStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = PluginConfig::from_env()?;
    // 初始化结构化日志
    init_tracing(&config.log_level);

    // 内存 MAM 客户端（演示数据）
    let client: Arc<dyn MamClient> = Arc::new(seeded_client());

    // 监听器：解析收藏集失败不阻止启动
    let last_visited = Arc::new(
        LastVisitedItems::new(
            client.clone(),
            Arc::new(SystemClock),
            LastVisitedConfig::from(&config),
        )
        .await,
    );
    let pre_metadata = Arc::new(PreMetadataUpdate::new(client.clone()));

    let builder = last_visited.register(SignalBusBuilder::new());
    let bus = pre_metadata.register(builder).build()?;

    let plugins = PluginRegistry::with_defaults(&config)?;
    let models: Arc<dyn PluginModelStore> = Arc::new(InMemoryPluginModelStore::new());

    info!(
        target: "portal.host",
        collection_id = last_visited.collection_id().unwrap_or("-"),
        window_seconds = config.last_visited_window_seconds,
        widgets = plugins.widgets().len(),
        "portal host ready"
    );

    let host = Host {
        bus,
        client,
        plugins,
        models,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!(target: "portal.host", error = %err, "invalid command");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        host.execute(command).await;
    }

    let snapshot = metrics().snapshot();
    info!(
        target: "portal.host",
        visits_received = snapshot.visits_received,
        flush_success = snapshot.flush_success,
        metadata_changes_detected = snapshot.metadata_changes_detected,
        "portal host stopped"
    );
    Ok(())
}

impl Host {
    async fn execute(&self, command: Command) {
        if let Some(signal) = command.to_signal() {
            let handled = self.bus.publish(signal).await;
            println!("handled by {handled} subscriber(s)");
            return;
        }
        match command {
            Command::Widgets => {
                for widget in self.plugins.widgets() {
                    let data = widget.render_data(serde_json::Map::new(), &serde_json::Map::new());
                    println!(
                        "{} [{}] {}",
                        widget.name(),
                        widget.template_name(),
                        serde_json::Value::Object(data)
                    );
                }
            }
            Command::Blocks { tag, theme } => {
                for output in self.plugins.render_blocks(&tag, theme.as_deref()) {
                    match serde_json::to_string(&output) {
                        Ok(json) => println!("{json}"),
                        Err(err) => warn!(target: "portal.host", error = %err, "block output"),
                    }
                }
            }
            Command::Users => {
                for user in fetch_backend_users(self.client.as_ref()).await {
                    println!(
                        "{} {} disabled={}",
                        user.username,
                        user.real_name.as_deref().unwrap_or("-"),
                        user.disabled
                    );
                }
            }
            Command::Models => match self.models.list_models().await {
                Ok(items) => {
                    for item in items {
                        println!("{} {item}", item.id);
                    }
                }
                Err(err) => warn!(target: "portal.host", error = %err, "list models failed"),
            },
            Command::ModelAdd { external_id, name } => {
                let input = PluginModelCreate {
                    name,
                    description: None,
                    external_id,
                };
                match self.models.create_model(input).await {
                    Ok(record) => println!("created {} {record}", record.id),
                    Err(err) => warn!(target: "portal.host", error = %err, "create model failed"),
                }
            }
            Command::ModelDelete(ids) => match self.models.delete_models(&ids).await {
                Ok(count) => println!("deleted {count}"),
                Err(err) => warn!(target: "portal.host", error = %err, "delete models failed"),
            },
            Command::Visit(_) | Command::Modify { .. } | Command::Quit => {}
        }
    }
}

fn seeded_client() -> InMemoryMamClient {
    let client = InMemoryMamClient::new();
    client.insert_item(
        "VX-1",
        ItemMetadata::new(vec![MetadataField::new("title", "Opening")]),
    );
    client.insert_item(
        "VX-2",
        ItemMetadata::new(vec![
            MetadataField::new("title", "Sunset"),
            MetadataField::new("genre", "nature"),
        ]),
    );
    client.insert_item("VX-3", ItemMetadata::default());
    client.insert_user(MamUser::new("admin", Some("Administrator".to_string())));
    let mut disabled = MamUser::new("guest", None);
    disabled.disabled = true;
    client.insert_user(disabled);
    client
}
