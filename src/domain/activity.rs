//! Client-local activity log
//!
//! A bounded, most-recent-first record of what the user did this session.
//! Purely in-memory: it does not persist across reloads and does not
//! reconcile with on-chain history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// What the user did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    Create,
    Decrypt,
    CheckAvailability,
    View,
    Refresh,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "CREATE",
            ActivityAction::Decrypt => "DECRYPT",
            ActivityAction::CheckAvailability => "CHECK_AVAILABILITY",
            ActivityAction::View => "VIEW",
            ActivityAction::Refresh => "REFRESH",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How it went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Failed,
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityStatus::Success => write!(f, "success"),
            ActivityStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One entry in the activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: ActivityAction,
    /// What the action targeted (a record id, "system", ...)
    pub target: String,
    pub status: ActivityStatus,
    pub timestamp: DateTime<Utc>,
}

/// Bounded most-recent-first activity ring
///
/// Invariant: `len() <= capacity` at all times; pushing into a full log
/// evicts the oldest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry as the newest (index 0)
    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Newest entry, if any
    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    /// Entry at `index`, newest first
    pub fn get(&self, index: usize) -> Option<&ActivityEntry> {
        self.entries.get(index)
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
