use crate::error::SignalError;
use async_trait::async_trait;
use domain::Signal;
use portal_telemetry::{record_signal_published, record_signal_unrouted};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{Instrument, debug, warn};
use uuid::Uuid;

/// 带唯一 ID 的信号。
#[derive(Debug, Clone)]
pub struct SignalEnvelope {
    pub signal_id: Uuid,
    pub signal: Signal,
}

/// 信号处理器。
#[async_trait]
pub trait SignalHandler: Send + Sync {
    async fn handle(&self, envelope: &SignalEnvelope) -> Result<(), SignalError>;
}

pub(crate) struct Route {
    pub subscriber_id: &'static str,
    pub handler: Arc<dyn SignalHandler>,
}

/// 信号总线（可克隆，共享同一路由表）。
#[derive(Clone)]
pub struct SignalBus {
    routes: Arc<HashMap<&'static str, Vec<Route>>>,
}

impl SignalBus {
    pub(crate) fn new(routes: HashMap<&'static str, Vec<Route>>) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    /// 发布信号，返回被调用的处理器数量。
    ///
    /// 处理器失败只记录告警，不影响后续处理器。
    pub async fn publish(&self, signal: Signal) -> usize {
        let envelope = SignalEnvelope {
            signal_id: Uuid::new_v4(),
            signal,
        };
        let signal_type = envelope.signal.signal_type();
        record_signal_published();

        let Some(routes) = self.routes.get(signal_type) else {
            record_signal_unrouted();
            debug!(target: "portal.signals", signal_type, "signal_unrouted");
            return 0;
        };

        let span = tracing::info_span!(
            "signal",
            signal_id = %envelope.signal_id,
            signal_type = signal_type
        );
        async {
            for route in routes {
                if let Err(err) = route.handler.handle(&envelope).await {
                    warn!(
                        target: "portal.signals",
                        subscriber_id = route.subscriber_id,
                        error = %err,
                        "signal handler failed"
                    );
                }
            }
        }
        .instrument(span)
        .await;
        routes.len()
    }

    /// 某信号类型的订阅者（按注册顺序）。
    pub fn subscribers(&self, signal_type: &str) -> Vec<&'static str> {
        self.routes
            .get(signal_type)
            .map(|routes| routes.iter().map(|route| route.subscriber_id).collect())
            .unwrap_or_default()
    }
}
