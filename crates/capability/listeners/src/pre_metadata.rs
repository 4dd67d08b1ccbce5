use async_trait::async_trait;
use domain::{FieldChange, ItemMetadata, MetadataDocument, SET_ITEM_METADATA, Signal};
use portal_mam::MamClient;
use portal_signals::{SignalBusBuilder, SignalEnvelope, SignalError, SignalHandler};
use portal_telemetry::record_metadata_changes;
use std::sync::Arc;
use tracing::{debug, error};

/// 元数据提交前的变更检测。
///
/// 只记录日志，不修改、不拦截提交。
pub struct PreMetadataUpdate {
    client: Arc<dyn MamClient>,
}

impl PreMetadataUpdate {
    pub const SUBSCRIBER_ID: &'static str = "pre_metadata_update";

    pub fn new(client: Arc<dyn MamClient>) -> Self {
        Self { client }
    }

    /// 比对待提交文档与条目当前元数据，返回将被修改的字段。
    pub async fn on_pre_modify(
        &self,
        item_id: &str,
        method: &str,
        document: &MetadataDocument,
    ) -> Vec<FieldChange> {
        if method != SET_ITEM_METADATA {
            return Vec::new();
        }
        debug!(target: "portal.listeners", item_id, "received a setItemMetadata signal");

        let current = match self.client.get_item_metadata(item_id).await {
            Ok(metadata) => metadata,
            Err(err) => {
                error!(target: "portal.listeners", item_id, error = %err, "failed getting item");
                return Vec::new();
            }
        };

        let changes = detect_changes(&current, document);
        for change in &changes {
            debug!(
                target: "portal.listeners",
                item_id,
                field = %change.field,
                old_value = %change.old_value,
                new_value = %change.new_value,
                "field is about to be changed"
            );
        }
        record_metadata_changes(changes.len() as u64);
        changes
    }

    /// 订阅条目修改前信号。
    pub fn register(self: &Arc<Self>, builder: SignalBusBuilder) -> SignalBusBuilder {
        builder.subscribe(
            Signal::PRE_MODIFY,
            Self::SUBSCRIBER_ID,
            Arc::clone(self) as Arc<dyn SignalHandler>,
        )
    }
}

#[async_trait]
impl SignalHandler for PreMetadataUpdate {
    async fn handle(&self, envelope: &SignalEnvelope) -> Result<(), SignalError> {
        if let Signal::PreModify {
            item_id,
            method,
            metadata_document,
        } = &envelope.signal
        {
            self.on_pre_modify(item_id, method, metadata_document).await;
        }
        Ok(())
    }
}

/// 只看第一个全时段 timespan（排除时基元数据），逐字段比较首值。
///
/// 条目上不存在的字段、任一侧没有取值的字段直接跳过。
pub fn detect_changes(current: &ItemMetadata, document: &MetadataDocument) -> Vec<FieldChange> {
    let Some(span) = document.whole_item_span() else {
        return Vec::new();
    };
    span.fields
        .iter()
        .filter_map(|field| {
            let new_value = field.first_value()?;
            let old_value = current.field_by_name(&field.name)?.first_value()?;
            (new_value != old_value).then(|| FieldChange {
                field: field.name.clone(),
                old_value: old_value.to_string(),
                new_value: new_value.to_string(),
            })
        })
        .collect()
}
