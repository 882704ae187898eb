//! Dashboard view state
//!
//! An explicit state store with named fields and pure reducer methods, so
//! every transition is testable without a rendering environment. The
//! controller is the only writer; reducers never perform I/O.

use chrono::{DateTime, Utc};

use crate::domain::{
    filter_records, AccessRecord, ActivityAction, ActivityEntry, ActivityLog, ActivityStatus,
    Notification, NotificationId, NotificationKind, NotificationSlot, RecordDraft, SummaryStats,
};

use super::ControllerConfig;

/// The whole client-side view state of the dashboard
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// First-load gate; cleared once the initial record load settles
    pub loading: bool,
    /// A manual or post-write refresh is in flight (does not re-trigger the
    /// full-page loading screen)
    pub refreshing: bool,
    /// A creation flow is in flight
    pub creating: bool,
    /// A decryption flow is in flight
    pub decrypting: bool,
    /// Encryption subsystem initialized for the current session
    pub encryption_ready: bool,
    /// Session-open activity entries have been seeded
    pub session_seeded: bool,
    /// Creation form visibility
    pub show_create_form: bool,
    /// Cached record collection; registry is the source of truth
    pub records: Vec<AccessRecord>,
    /// Derived stats; written only by [`DashboardState::recompute_stats`]
    pub stats: SummaryStats,
    pub draft: RecordDraft,
    pub search_term: String,
    pub activity: ActivityLog,
    pub notifications: NotificationSlot,
}

impl DashboardState {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            loading: true,
            refreshing: false,
            creating: false,
            decrypting: false,
            encryption_ready: false,
            session_seeded: false,
            show_create_form: false,
            records: Vec::new(),
            stats: SummaryStats::default(),
            draft: RecordDraft::default(),
            search_term: String::new(),
            activity: ActivityLog::new(config.activity_capacity),
            notifications: NotificationSlot::new(),
        }
    }

    /// Replace the cached collection and recompute stats
    pub fn set_records(&mut self, records: Vec<AccessRecord>, now: DateTime<Utc>) {
        self.records = records;
        self.recompute_stats(now);
    }

    /// Recompute derived stats from the current collection
    ///
    /// Invariant: this is the only writer of `stats`.
    pub fn recompute_stats(&mut self, now: DateTime<Utc>) {
        self.stats = SummaryStats::compute(&self.records, now);
    }

    /// Records matching the current search term, collection order preserved
    pub fn visible_records(&self) -> Vec<&AccessRecord> {
        filter_records(&self.records, &self.search_term)
    }

    /// Append an activity entry as the newest
    pub fn push_activity(
        &mut self,
        action: ActivityAction,
        target: impl Into<String>,
        status: ActivityStatus,
        now: DateTime<Utc>,
    ) {
        self.activity.push(ActivityEntry {
            action,
            target: target.into(),
            status,
            timestamp: now,
        });
    }

    /// Seed the session-open history shown before the user does anything
    pub fn seed_session_activity(&mut self, now: DateTime<Utc>) {
        self.push_activity(
            ActivityAction::Refresh,
            "records",
            ActivityStatus::Success,
            now - chrono::Duration::seconds(5),
        );
        self.push_activity(
            ActivityAction::View,
            "dashboard",
            ActivityStatus::Success,
            now - chrono::Duration::seconds(1),
        );
        self.session_seeded = true;
    }

    /// Publish a notification, superseding the current one
    pub fn publish_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> NotificationId {
        self.notifications.publish(kind, message)
    }

    /// Clear the notification slot if `id` is still current
    pub fn clear_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.clear(id)
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn open_create_form(&mut self) {
        self.show_create_form = true;
    }

    pub fn close_create_form(&mut self) {
        self.show_create_form = false;
    }
}
