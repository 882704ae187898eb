//! Derived read models over the cached record collection
//!
//! Both functions here are pure: stats are recomputed by an explicit reducer
//! call after every collection change (there is no independent update path),
//! and filtering is recomputed per call, never cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AccessRecord;

/// Summary statistics over the cached record collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of cached records
    pub total: usize,
    /// Number of verified records
    pub verified: usize,
    /// Number of records created on the current UTC calendar day
    pub today: usize,
}

impl SummaryStats {
    /// Compute stats for `records` as of `now`
    pub fn compute(records: &[AccessRecord], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            total: records.len(),
            verified: records.iter().filter(|r| r.verified).count(),
            today: records
                .iter()
                .filter(|r| r.timestamp.date_naive() == today)
                .count(),
        }
    }
}

/// Case-insensitive substring filter against record name or description
///
/// An empty term matches everything. Preserves the collection's order.
pub fn filter_records<'a>(records: &'a [AccessRecord], term: &str) -> Vec<&'a AccessRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle)
        })
        .collect()
}
