//! Typed in-process event bus for ledger changes.
//!
//! The dashboard used to signal cross-component refreshes through ambient
//! global callbacks. Services now emit [`LedgerEvent`]s on an explicit bus and
//! presentation code subscribes; nothing hangs off global scope.

use std::sync::RwLock;

use log::debug;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    InvestmentAdded {
        startup_id: String,
        record_id: String,
    },
    InvestmentDeleted {
        startup_id: String,
        record_id: String,
    },
    RecognitionAdded {
        startup_id: String,
        record_id: String,
    },
    RecognitionDeleted {
        startup_id: String,
        record_id: String,
    },
    FoundersReplaced {
        startup_id: String,
        count: usize,
    },
    /// Emitted whenever the derived totals are recomputed and persisted.
    LedgerRecomputed {
        startup_id: String,
        total_funding: Decimal,
        total_shares: i64,
        price_per_share: Decimal,
    },
}

type Subscriber = Box<dyn Fn(&LedgerEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&LedgerEvent) + Send + Sync + 'static) {
        let mut subscribers = match self.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push(Box::new(subscriber));
    }

    /// Fan the event out to every subscriber, synchronously, in
    /// subscription order.
    pub fn emit(&self, event: &LedgerEvent) {
        let subscribers = match self.subscribers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        debug!(
            "[Events] emitting {:?} to {} subscriber(s)",
            event,
            subscribers.len()
        );
        for subscriber in subscribers.iter() {
            subscriber(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn emit_reaches_every_subscriber() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let seen = seen.clone();
            bus.subscribe(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            });
        }

        bus.emit(&LedgerEvent::FoundersReplaced {
            startup_id: "startup-1".to_string(),
            count: 2,
        });
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn subscribers_receive_the_event_payload() {
        let bus = EventBus::new();
        let seen = Arc::new(RwLock::new(None));
        let sink = seen.clone();
        bus.subscribe(move |event| {
            *sink.write().unwrap() = Some(event.clone());
        });

        let event = LedgerEvent::InvestmentDeleted {
            startup_id: "startup-1".to_string(),
            record_id: "record-9".to_string(),
        };
        bus.emit(&event);
        assert_eq!(seen.read().unwrap().as_ref(), Some(&event));
    }
}
