//! 日志追踪初始化与进程内计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub visits_received: u64,
    pub flush_attempts: u64,
    pub flush_success: u64,
    pub flush_skipped_unresolved: u64,
    pub grouping_failure: u64,
    pub attach_failure: u64,
    pub metadata_changes_detected: u64,
    pub signals_published: u64,
    pub signals_unrouted: u64,
}

/// 进程内计数器（按进程独立，不做跨进程汇总）。
pub struct TelemetryMetrics {
    visits_received: AtomicU64,
    flush_attempts: AtomicU64,
    flush_success: AtomicU64,
    flush_skipped_unresolved: AtomicU64,
    grouping_failure: AtomicU64,
    attach_failure: AtomicU64,
    metadata_changes_detected: AtomicU64,
    signals_published: AtomicU64,
    signals_unrouted: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            visits_received: AtomicU64::new(0),
            flush_attempts: AtomicU64::new(0),
            flush_success: AtomicU64::new(0),
            flush_skipped_unresolved: AtomicU64::new(0),
            grouping_failure: AtomicU64::new(0),
            attach_failure: AtomicU64::new(0),
            metadata_changes_detected: AtomicU64::new(0),
            signals_published: AtomicU64::new(0),
            signals_unrouted: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            visits_received: self.visits_received.load(Ordering::Relaxed),
            flush_attempts: self.flush_attempts.load(Ordering::Relaxed),
            flush_success: self.flush_success.load(Ordering::Relaxed),
            flush_skipped_unresolved: self.flush_skipped_unresolved.load(Ordering::Relaxed),
            grouping_failure: self.grouping_failure.load(Ordering::Relaxed),
            attach_failure: self.attach_failure.load(Ordering::Relaxed),
            metadata_changes_detected: self.metadata_changes_detected.load(Ordering::Relaxed),
            signals_published: self.signals_published.load(Ordering::Relaxed),
            signals_unrouted: self.signals_unrouted.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing；RUST_LOG 优先，其次使用传入的默认级别。
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 记录收到的条目访问次数。
pub fn record_visit_received() {
    metrics().visits_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录批量写入尝试次数（含失败）。
pub fn record_flush_attempt() {
    metrics().flush_attempts.fetch_add(1, Ordering::Relaxed);
}

/// 记录批量写入成功次数（library 已创建）。
pub fn record_flush_success() {
    metrics().flush_success.fetch_add(1, Ordering::Relaxed);
}

/// 记录因收藏集未解析而跳过的写入次数。
pub fn record_flush_skipped_unresolved() {
    metrics()
        .flush_skipped_unresolved
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录 library 创建失败次数。
pub fn record_grouping_failure() {
    metrics().grouping_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录 library 挂载到收藏集失败次数。
pub fn record_attach_failure() {
    metrics().attach_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录检测到的元数据变更字段数。
pub fn record_metadata_changes(count: u64) {
    metrics()
        .metadata_changes_detected
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录信号发布次数。
pub fn record_signal_published() {
    metrics().signals_published.fetch_add(1, Ordering::Relaxed);
}

/// 记录无订阅者的信号次数。
pub fn record_signal_unrouted() {
    metrics().signals_unrouted.fetch_add(1, Ordering::Relaxed);
}
