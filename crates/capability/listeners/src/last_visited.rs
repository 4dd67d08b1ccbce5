//! 最近访问条目聚合器
//!
//! 每次条目页被访问时记录条目 ID；距上次写入超过一个窗口（默认 30 秒）时，
//! 把累计的条目建成一个 library 并挂到"最近访问"收藏集上，避免逐条写远程 API。
//!
//! 状态：
//! - pending：上次写入以来的条目 ID（去重，顺序无关）
//! - last_flush_at_ms：上次尝试写入的时间；初始为"一个窗口之前"，首个访问即可触发写入
//! - collection_id：启动时解析一次，之后不再变化；解析失败则永久为 None，所有写入静默跳过
//!
//! 只在收到访问时判断是否到期，没有后台定时器。

use async_trait::async_trait;
use domain::Signal;
use portal_config::PluginConfig;
use portal_mam::{MamClient, MamError};
use portal_signals::{SignalBusBuilder, SignalEnvelope, SignalError, SignalHandler};
use portal_telemetry::{
    record_attach_failure, record_flush_attempt, record_flush_skipped_unresolved,
    record_flush_success, record_grouping_failure, record_visit_received,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::clock::Clock;

/// 聚合器参数。
#[derive(Debug, Clone)]
pub struct LastVisitedConfig {
    pub window_ms: i64,
    pub collection_name: String,
    pub marker_field: String,
    pub marker_value: String,
}

impl Default for LastVisitedConfig {
    fn default() -> Self {
        Self::from(&PluginConfig::default())
    }
}

impl From<&PluginConfig> for LastVisitedConfig {
    fn from(config: &PluginConfig) -> Self {
        Self {
            window_ms: config.last_visited_window_ms(),
            collection_name: config.last_visited_collection_name.clone(),
            marker_field: config.collection_marker_field.clone(),
            marker_value: config.collection_marker_value.clone(),
        }
    }
}

/// 单次访问的处理结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// 窗口未到期，仅记录条目
    NotDue,
    /// 到期但收藏集未解析，跳过写入
    Unresolved,
    /// library 创建失败，pending 保留到下个窗口
    GroupingFailed,
    /// library 已创建；attached 表示是否成功挂到收藏集
    Flushed { library_id: String, attached: bool },
}

struct VisitState {
    pending: Vec<String>,
    last_flush_at_ms: i64,
}

/// 最近访问条目聚合器
pub struct LastVisitedItems {
    client: Arc<dyn MamClient>,
    clock: Arc<dyn Clock>,
    window_ms: i64,
    collection_id: Option<String>,
    state: Mutex<VisitState>,
}

impl LastVisitedItems {
    pub const SUBSCRIBER_ID: &'static str = "last_visited_items";

    /// 解析（或创建）目标收藏集后构造聚合器。
    ///
    /// 解析失败只告警一次，聚合器以"未解析"状态继续存在。
    pub async fn new(
        client: Arc<dyn MamClient>,
        clock: Arc<dyn Clock>,
        config: LastVisitedConfig,
    ) -> Self {
        let collection_id = match resolve_or_create_collection(client.as_ref(), &config).await {
            Ok(collection_id) => Some(collection_id),
            Err(err) => {
                warn!(
                    target: "portal.listeners",
                    error = %err,
                    collection_name = %config.collection_name,
                    "last visited collection unresolved, visits will not be recorded"
                );
                None
            }
        };
        Self::with_collection(client, clock, config.window_ms, collection_id)
    }

    /// 使用已知的收藏集 ID 构造（不发起远程调用）。
    pub fn with_collection(
        client: Arc<dyn MamClient>,
        clock: Arc<dyn Clock>,
        window_ms: i64,
        collection_id: Option<String>,
    ) -> Self {
        let last_flush_at_ms = clock.now_ms().saturating_sub(window_ms);
        Self {
            client,
            clock,
            window_ms,
            collection_id,
            state: Mutex::new(VisitState {
                pending: Vec::new(),
                last_flush_at_ms,
            }),
        }
    }

    pub fn collection_id(&self) -> Option<&str> {
        self.collection_id.as_deref()
    }

    pub async fn pending(&self) -> Vec<String> {
        self.state.lock().await.pending.clone()
    }

    pub async fn last_flush_at_ms(&self) -> i64 {
        self.state.lock().await.last_flush_at_ms
    }

    /// 记录一次条目访问，到期时写入。
    ///
    /// 整个处理过程持有状态锁，同一进程内的并发访问按顺序执行。
    pub async fn on_visit(&self, item_id: &str) -> VisitOutcome {
        record_visit_received();
        let mut state = self.state.lock().await;
        if !state.pending.iter().any(|id| id == item_id) {
            state.pending.push(item_id.to_string());
        }

        let now = self.clock.now_ms();
        if now.saturating_sub(state.last_flush_at_ms) < self.window_ms {
            debug!(
                target: "portal.listeners",
                item_id,
                pending = state.pending.len(),
                "last_visited_not_due"
            );
            return VisitOutcome::NotDue;
        }

        // 先推进时间戳：远程调用慢或失败时，同一窗口内也不再重试
        state.last_flush_at_ms = now;
        record_flush_attempt();

        let Some(collection_id) = self.collection_id.as_deref() else {
            record_flush_skipped_unresolved();
            debug!(
                target: "portal.listeners",
                pending = state.pending.len(),
                "last_visited_skipped_unresolved"
            );
            return VisitOutcome::Unresolved;
        };

        let library_id = match self.client.create_library_from_items(&state.pending).await {
            Ok(library_id) => library_id,
            Err(err) => {
                record_grouping_failure();
                warn!(
                    target: "portal.listeners",
                    error = %err,
                    items = ?state.pending,
                    "failed updating last visited items collection: could not create library from item list"
                );
                return VisitOutcome::GroupingFailed;
            }
        };
        record_flush_success();

        let attached = match self
            .client
            .add_library_to_collection(collection_id, &library_id)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                record_attach_failure();
                warn!(
                    target: "portal.listeners",
                    error = %err,
                    library_id = %library_id,
                    items = ?state.pending,
                    "failed updating last visited items collection: could not add library to collection"
                );
                false
            }
        };

        // library 创建成功即视为本批结束；挂载失败时 library 成为孤儿，不重试
        let flushed = state.pending.len();
        state.pending.clear();
        info!(
            target: "portal.listeners",
            collection_id,
            library_id = %library_id,
            items = flushed,
            attached,
            "last_visited_flushed"
        );
        VisitOutcome::Flushed {
            library_id,
            attached,
        }
    }

    /// 订阅条目访问信号。
    pub fn register(self: &Arc<Self>, builder: SignalBusBuilder) -> SignalBusBuilder {
        builder.subscribe(
            Signal::ITEM_VISITED,
            Self::SUBSCRIBER_ID,
            Arc::clone(self) as Arc<dyn SignalHandler>,
        )
    }
}

#[async_trait]
impl SignalHandler for LastVisitedItems {
    async fn handle(&self, envelope: &SignalEnvelope) -> Result<(), SignalError> {
        if let Signal::ItemVisited { item_id } = &envelope.signal {
            self.on_visit(item_id).await;
        }
        Ok(())
    }
}

/// 查找带标记字段的收藏集；没有则创建并打标记。
///
/// 搜索或创建失败时返回错误（调用方视为未解析，不重试）。
/// 打标记失败只告警，仍返回新建的 ID。
pub async fn resolve_or_create_collection(
    client: &dyn MamClient,
    config: &LastVisitedConfig,
) -> Result<String, MamError> {
    let hits = client
        .search_collections(&config.marker_field, &config.marker_value)
        .await?;
    if let Some(collection_id) = hits.into_iter().next() {
        debug!(
            target: "portal.listeners",
            collection_id = %collection_id,
            "last visited collection found"
        );
        return Ok(collection_id);
    }

    let collection_id = client.create_collection(&config.collection_name).await?;
    if let Err(err) = client
        .set_collection_field(&collection_id, &config.marker_field, &config.marker_value)
        .await
    {
        warn!(
            target: "portal.listeners",
            collection_id = %collection_id,
            error = %err,
            "failed tagging last visited collection"
        );
    }
    info!(
        target: "portal.listeners",
        collection_id = %collection_id,
        collection_name = %config.collection_name,
        "last visited collection created"
    );
    Ok(collection_id)
}
