//! Domain layer for the AccessGate client
//!
//! Pure types and pure derived-state functions:
//! - Access records and their identifiers
//! - Client-local activity log (bounded, most-recent-first)
//! - Summary statistics and record filtering
//! - Single-slot transient notifications

mod activity;
mod notification;
mod record;
mod stats;

pub use activity::{ActivityAction, ActivityEntry, ActivityLog, ActivityStatus};
pub use notification::{Notification, NotificationId, NotificationKind, NotificationSlot};
pub use record::{AccessRecord, Address, EncryptedHandle, RecordDraft, RecordId, ValidDraft};
pub use stats::{filter_records, SummaryStats};
