//! In-process fan-out of realtime events.
//!
//! One hub exists per connection. Screens take a [`Subscription`] for the
//! event kinds they care about; dropping it removes exactly that handler.
//! Outbound events are queued on a channel drained by the connection writer.

use std::sync::{
    Arc, Mutex, Weak,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::mpsc;

use crate::{
    domain::{ChannelError, CheatReport, EventEmitter, EventKind, RoomEvent},
    infrastructure::dto::realtime::ClientEvent,
};

struct Handler {
    id: u64,
    kinds: Vec<EventKind>,
    tx: mpsc::UnboundedSender<RoomEvent>,
}

struct HubInner {
    handlers: Mutex<Vec<Handler>>,
    next_id: AtomicU64,
    outbound: Mutex<Option<mpsc::UnboundedSender<ClientEvent>>>,
}

impl HubInner {
    fn unregister(&self, id: u64) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.retain(|h| h.id != id);
        }
    }
}

#[derive(Clone)]
pub struct EventHub {
    inner: Arc<HubInner>,
}

impl EventHub {
    /// Create a hub together with the receiving end of its outbound queue
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            inner: Arc::new(HubInner {
                handlers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                outbound: Mutex::new(Some(tx)),
            }),
        };
        (hub, rx)
    }

    /// Register a handler for `kinds`.
    ///
    /// A single subscription receives all requested kinds in arrival order.
    /// On a closed hub the subscription ends immediately.
    pub fn subscribe(&self, kinds: &[EventKind]) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        if self.is_closed() {
            tracing::debug!("Hub closed; handler {} not registered", id);
        } else if let Ok(mut handlers) = self.inner.handlers.lock() {
            handlers.push(Handler {
                id,
                kinds: kinds.to_vec(),
                tx,
            });
        }
        tracing::debug!("Subscribed handler {} to {:?}", id, kinds);
        Subscription {
            guard: SubscriptionGuard {
                id,
                hub: Arc::downgrade(&self.inner),
            },
            rx,
        }
    }

    /// Deliver an inbound event to every matching handler.
    ///
    /// Returns the number of handlers reached. Handlers whose receiver is gone
    /// are pruned.
    pub fn dispatch(&self, event: RoomEvent) -> usize {
        let kind = event.kind();
        let Ok(mut handlers) = self.inner.handlers.lock() else {
            return 0;
        };
        let mut delivered = 0;
        handlers.retain(|handler| {
            if !handler.kinds.contains(&kind) {
                return true;
            }
            match handler.tx.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });
        tracing::debug!("Dispatched {} to {} handler(s)", kind.name(), delivered);
        delivered
    }

    pub fn handler_count(&self) -> usize {
        self.inner.handlers.lock().map(|h| h.len()).unwrap_or(0)
    }

    /// Stop accepting outbound events and end every subscription.
    pub fn close(&self) {
        if let Ok(mut outbound) = self.inner.outbound.lock() {
            outbound.take();
        }
        if let Ok(mut handlers) = self.inner.handlers.lock() {
            handlers.clear();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner
            .outbound
            .lock()
            .map(|o| o.is_none())
            .unwrap_or(true)
    }

    fn send(&self, event: ClientEvent) -> Result<(), ChannelError> {
        let outbound = self
            .inner
            .outbound
            .lock()
            .map_err(|_| ChannelError::Closed)?;
        let tx = outbound.as_ref().ok_or(ChannelError::Closed)?;
        tx.send(event).map_err(|_| ChannelError::Closed)
    }
}

impl EventEmitter for EventHub {
    fn emit_cheat(&self, report: &CheatReport) -> Result<(), ChannelError> {
        tracing::info!(
            "Reporting cheat: participant={} reason={}",
            report.participant_id,
            report.reason
        );
        self.send(ClientEvent::CheatDetected(report.clone()))
    }
}

/// Deregisters its handler when dropped
pub struct SubscriptionGuard {
    id: u64,
    hub: Weak<HubInner>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.unregister(self.id);
            tracing::debug!("Unsubscribed handler {}", self.id);
        }
    }
}

/// Live registration on an [`EventHub`]
pub struct Subscription {
    guard: SubscriptionGuard,
    rx: mpsc::UnboundedReceiver<RoomEvent>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.guard.id
    }

    /// Next event, `None` once the hub is closed
    pub async fn recv(&mut self) -> Option<RoomEvent> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<RoomEvent> {
        self.rx.try_recv().ok()
    }

    /// Split into the guard and the raw receiver, so the receiver can move
    /// into a task while the guard stays with the owner.
    pub fn into_parts(self) -> (SubscriptionGuard, mpsc::UnboundedReceiver<RoomEvent>) {
        (self.guard, self.rx)
    }
}
