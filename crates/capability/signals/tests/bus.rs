use async_trait::async_trait;
use domain::{MetadataDocument, Signal};
use portal_signals::{SignalBusBuilder, SignalEnvelope, SignalError, SignalHandler};
use std::sync::{Arc, Mutex};

struct Recorder {
    name: &'static str,
    seen: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl SignalHandler for Recorder {
    async fn handle(&self, envelope: &SignalEnvelope) -> Result<(), SignalError> {
        self.seen
            .lock()
            .expect("lock")
            .push(format!("{}:{}", self.name, envelope.signal.item_id()));
        if self.fail {
            return Err(SignalError::Handler("boom".to_string()));
        }
        Ok(())
    }
}

fn recorder(name: &'static str, seen: &Arc<Mutex<Vec<String>>>, fail: bool) -> Arc<Recorder> {
    Arc::new(Recorder {
        name,
        seen: Arc::clone(seen),
        fail,
    })
}

#[tokio::test]
async fn publish_invokes_handlers_in_registration_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let bus = SignalBusBuilder::new()
        .subscribe(Signal::ITEM_VISITED, "first", recorder("first", &seen, true))
        .subscribe(Signal::ITEM_VISITED, "second", recorder("second", &seen, false))
        .subscribe(Signal::PRE_MODIFY, "other", recorder("other", &seen, false))
        .build()
        .expect("build");

    let invoked = bus.publish(Signal::item_visited("VX-1")).await;
    assert_eq!(invoked, 2);
    assert_eq!(
        *seen.lock().expect("lock"),
        vec!["first:VX-1".to_string(), "second:VX-1".to_string()]
    );
    assert_eq!(bus.subscribers(Signal::ITEM_VISITED), vec!["first", "second"]);
}

#[tokio::test]
async fn unrouted_signal_is_dropped() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let bus = SignalBusBuilder::new()
        .subscribe(Signal::ITEM_VISITED, "visits", recorder("visits", &seen, false))
        .build()
        .expect("build");

    let invoked = bus
        .publish(Signal::PreModify {
            item_id: "VX-1".to_string(),
            method: "setItemMetadata".to_string(),
            metadata_document: MetadataDocument::default(),
        })
        .await;
    assert_eq!(invoked, 0);
    assert!(seen.lock().expect("lock").is_empty());
}

#[test]
fn build_rejects_invalid_subscriptions() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let err = SignalBusBuilder::new()
        .subscribe(Signal::ITEM_VISITED, " ", recorder("x", &seen, false))
        .build()
        .err()
        .expect("empty subscriber");
    assert!(matches!(err, SignalError::EmptySubscriber));

    let err = SignalBusBuilder::new()
        .subscribe("item.deleted", "x", recorder("x", &seen, false))
        .build()
        .err()
        .expect("unknown type");
    assert!(matches!(err, SignalError::UnknownSignalType("x", "item.deleted")));

    let err = SignalBusBuilder::new()
        .subscribe(Signal::ITEM_VISITED, "x", recorder("x", &seen, false))
        .subscribe(Signal::ITEM_VISITED, "x", recorder("x", &seen, false))
        .build()
        .err()
        .expect("duplicate");
    assert!(matches!(err, SignalError::DuplicateSubscription("x", _)));
}
