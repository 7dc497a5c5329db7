//! Notification delivery sinks.

use crate::model::alert::Notification;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Delivery failure reported by a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification delivery failed: {}", self.message)
    }
}

impl Error for SinkError {}

/// Best-effort destination for keyword notifications.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: &Notification) -> Result<(), SinkError>;
}

/// Human-readable text addressed to the alert owner.
pub fn notification_text(notification: &Notification) -> String {
    format!(
        "A post or comment containing your keyword \"{}\" has been created, {}.",
        notification.keyword, notification.owner
    )
}

/// Delivers notifications as `info` records through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn deliver(&self, notification: &Notification) -> Result<(), SinkError> {
        info!(
            "event=keyword_alert module=alert status=delivered dispatch_id={} owner={} text={:?}",
            notification.dispatch_id,
            notification.owner,
            notification_text(notification)
        );
        Ok(())
    }
}

/// Keeps delivered notifications in memory.
///
/// Embedding hosts can drain it; [`MemorySink::set_failing`] makes every
/// delivery fail, which exercises best-effort handling.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of notifications delivered so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Removes and returns every delivered notification.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .delivered
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&self, notification: &Notification) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::new("memory sink is in failing mode"));
        }
        self.delivered
            .lock()
            .map_err(|_| SinkError::new("memory sink lock poisoned"))?
            .push(notification.clone());
        Ok(())
    }
}
