//! Controller configuration

use std::time::Duration;

/// Configuration for the dashboard controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Maximum entries kept in the activity log
    pub activity_capacity: usize,
    /// Auto-dismiss delay for general notifications
    pub notice_ttl: Duration,
    /// Auto-dismiss delay for the success toast after create/decrypt
    pub success_notice_ttl: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            activity_capacity: 10,
            notice_ttl: Duration::from_secs(3),
            success_notice_ttl: Duration::from_secs(2),
        }
    }
}
