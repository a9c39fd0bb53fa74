//! Sidebar preference sync
//!
//! One process-wide service keeps the collapsed flag consistent across
//! every mounted view and across other processes sharing the store.
//! Storage-change notifications do not fire in the context that wrote
//! the value, so a polling task backs up the notify path. Applying the
//! same value twice is a no-op; the poll and notify paths may race.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;

use super::local_store::{LocalStore, StoreError};

/// Store key holding the JSON-encoded flag
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Reconciliation interval; a write must be observed by other contexts
/// within one tick
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct SidebarSync {
    store: LocalStore,
    tx: watch::Sender<bool>,
    poll_interval: Duration,
}

impl SidebarSync {
    pub fn new(store: LocalStore) -> Self {
        Self::with_poll_interval(store, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(store: LocalStore, poll_interval: Duration) -> Self {
        let initial = store.get_bool(SIDEBAR_COLLAPSED_KEY).unwrap_or(false);
        let (tx, _rx) = watch::channel(initial);
        Self {
            store,
            tx,
            poll_interval,
        }
    }

    /// Read the persisted flag; unset or unparsable reads as `false`
    pub fn read(&self) -> bool {
        self.store.get_bool(SIDEBAR_COLLAPSED_KEY).unwrap_or(false)
    }

    /// Last value applied to subscribers
    pub fn current(&self) -> bool {
        *self.tx.borrow()
    }

    /// Persist and apply in the same call; the writing context receives
    /// no storage notification of its own write.
    pub fn write(&self, collapsed: bool) -> Result<(), StoreError> {
        self.store.set(SIDEBAR_COLLAPSED_KEY, Value::Bool(collapsed))?;
        self.apply(collapsed);
        Ok(())
    }

    /// Channel for mounted views; receivers see only actual changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Compare the persisted flag against the last applied value and
    /// apply on change. Doubles as the external-change notification
    /// entry point. Returns whether a change was applied.
    pub fn reconcile(&self) -> bool {
        let value = self.read();
        self.apply(value)
    }

    fn apply(&self, value: bool) -> bool {
        self.tx.send_if_modified(|current| {
            if *current != value {
                *current = value;
                true
            } else {
                false
            }
        })
    }

    /// Start the owned polling task
    pub fn spawn_poll(self: &Arc<Self>) -> JoinHandle<()> {
        let sync = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = interval(sync.poll_interval);
            loop {
                ticker.tick().await;
                if sync.reconcile() {
                    tracing::debug!(collapsed = sync.current(), "Sidebar preference reconciled");
                }
            }
        })
    }
}
