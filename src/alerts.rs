//! Transient alerts
//!
//! Alerts are scheduled with a display duration and disappear on expiry or
//! when dismissed. Interested parties subscribe to [`AlertEvent`]s instead of
//! polling. Nothing in the wizard depends on an alert's lifetime.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Identifies a scheduled alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertHandle(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub handle: AlertHandle,
    pub level: AlertLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    Raised(Alert),
    Dismissed(AlertHandle),
    Expired(AlertHandle),
}

struct Entry {
    alert: Alert,
    expiry: Option<AbortHandle>,
}

struct Inner {
    active: Mutex<Vec<Entry>>,
    events: broadcast::Sender<AlertEvent>,
    default_ttl: Duration,
}

impl Inner {
    fn remove(&self, handle: AlertHandle) -> Option<Entry> {
        let mut active = self.active.lock();
        let idx = active.iter().position(|e| e.alert.handle == handle)?;
        Some(active.remove(idx))
    }

    fn publish(&self, event: AlertEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

/// Shared alert surface. Cloning shares the same alerts.
#[derive(Clone)]
pub struct AlertCenter {
    inner: Arc<Inner>,
}

impl AlertCenter {
    pub fn new(default_ttl: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                active: Mutex::new(Vec::new()),
                events,
                default_ttl,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.inner.events.subscribe()
    }

    /// Show an error alert for the default duration
    pub fn error(&self, message: impl Into<String>) -> AlertHandle {
        self.schedule(AlertLevel::Error, message, self.inner.default_ttl)
    }

    pub fn info(&self, message: impl Into<String>) -> AlertHandle {
        self.schedule(AlertLevel::Info, message, self.inner.default_ttl)
    }

    /// Show an alert that expires after `ttl`.
    ///
    /// Expiry needs a tokio runtime; outside one the alert stays until
    /// dismissed.
    pub fn schedule(
        &self,
        level: AlertLevel,
        message: impl Into<String>,
        ttl: Duration,
    ) -> AlertHandle {
        let alert = Alert {
            handle: AlertHandle(Uuid::new_v4()),
            level,
            message: message.into(),
            raised_at: Utc::now(),
        };
        let handle = alert.handle;

        debug!("Alert raised: {}", alert.message);
        self.inner.active.lock().push(Entry {
            alert: alert.clone(),
            expiry: None,
        });
        self.inner.publish(AlertEvent::Raised(alert));

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let inner = Arc::clone(&self.inner);
                let task = runtime.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    if inner.remove(handle).is_some() {
                        debug!("Alert expired");
                        inner.publish(AlertEvent::Expired(handle));
                    }
                });
                // Entry may already be gone if the alert was dismissed or expired
                let mut active = self.inner.active.lock();
                match active.iter_mut().find(|e| e.alert.handle == handle) {
                    Some(entry) => entry.expiry = Some(task.abort_handle()),
                    None => task.abort(),
                }
            }
            Err(_) => warn!("No async runtime, alert will not expire on its own"),
        }
        handle
    }

    /// Remove an alert before it expires. Returns false if it is already gone.
    pub fn dismiss(&self, handle: AlertHandle) -> bool {
        match self.inner.remove(handle) {
            Some(entry) => {
                if let Some(expiry) = entry.expiry {
                    expiry.abort();
                }
                self.inner.publish(AlertEvent::Dismissed(handle));
                true
            }
            None => false,
        }
    }

    /// Alerts currently on screen, oldest first
    pub fn active(&self) -> Vec<Alert> {
        self.inner
            .active
            .lock()
            .iter()
            .map(|e| e.alert.clone())
            .collect()
    }
}
