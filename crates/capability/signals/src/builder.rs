use crate::bus::{Route, SignalBus, SignalHandler};
use crate::error::SignalError;
use domain::Signal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

struct Subscription {
    signal_type: &'static str,
    subscriber_id: &'static str,
    handler: Arc<dyn SignalHandler>,
}

/// 信号总线构建器：收集订阅，`build` 时统一校验。
#[derive(Default)]
pub struct SignalBusBuilder {
    subs: Vec<Subscription>,
}

impl SignalBusBuilder {
    pub fn new() -> Self {
        Self { subs: Vec::new() }
    }

    pub fn subscribe(
        mut self,
        signal_type: &'static str,
        subscriber_id: &'static str,
        handler: Arc<dyn SignalHandler>,
    ) -> Self {
        self.subs.push(Subscription {
            signal_type,
            subscriber_id,
            handler,
        });
        self
    }

    pub fn build(self) -> Result<SignalBus, SignalError> {
        validate(&self.subs)?;

        let mut routes: HashMap<&'static str, Vec<Route>> = HashMap::new();
        for sub in self.subs {
            routes.entry(sub.signal_type).or_default().push(Route {
                subscriber_id: sub.subscriber_id,
                handler: sub.handler,
            });
        }
        Ok(SignalBus::new(routes))
    }
}

fn validate(subs: &[Subscription]) -> Result<(), SignalError> {
    let mut seen: HashSet<(&'static str, &'static str)> = HashSet::new();
    for sub in subs {
        if sub.subscriber_id.trim().is_empty() {
            return Err(SignalError::EmptySubscriber);
        }
        if !Signal::KNOWN_TYPES.contains(&sub.signal_type) {
            return Err(SignalError::UnknownSignalType(
                sub.subscriber_id,
                sub.signal_type,
            ));
        }
        if !seen.insert((sub.subscriber_id, sub.signal_type)) {
            return Err(SignalError::DuplicateSubscription(
                sub.subscriber_id,
                sub.signal_type,
            ));
        }
    }
    Ok(())
}
