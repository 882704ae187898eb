//! Single-slot transient notifications
//!
//! The dashboard shows at most one status toast at a time; a new notification
//! overwrites the current one. Slots carry a monotonically increasing id so a
//! dismiss scheduled for an older notification can never clear a newer one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Pending,
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Pending => write!(f, "pending"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// Monotonic identity of a published notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A visible status notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Overwritable single notification slot with stale-dismiss protection
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a notification, superseding whatever is currently shown
    pub fn publish(&mut self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.current = Some(Notification {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Clear the slot, but only if `id` still identifies the current
    /// notification. Returns whether anything was cleared.
    pub fn clear(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(current) if current.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }
}
