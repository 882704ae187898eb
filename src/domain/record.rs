//! Access record types
//!
//! An access record pairs an encrypted numeric value (held on-chain behind an
//! opaque handle) with public metadata. Records are created through the
//! signer-backed registry and only ever mutated by the chain itself; the
//! client refreshes its cached copy instead of editing it locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::infra::{DashboardError, Result};

/// Identifier of an access record within the registry
///
/// Unique within the cached collection. Client-generated ids use a v4 UUID
/// suffix so that two sessions creating records at the same instant cannot
/// collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh collision-resistant record id
    pub fn generate() -> Self {
        Self(format!("access-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Wallet or contract address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated prefix for display ("0x1234abcd...")
    pub fn short(&self) -> String {
        if self.0.len() <= 8 {
            self.0.clone()
        } else {
            format!("{}...", &self.0[..8])
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque handle to an encrypted value held by the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedHandle(pub String);

impl EncryptedHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncryptedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An access record as cached from the registry
///
/// `decrypted_value` is meaningful only when `verified` is true; use
/// [`AccessRecord::clear_value`] to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub id: RecordId,
    pub name: String,
    /// Handle to the encrypted numeric value
    pub encrypted_value: EncryptedHandle,
    pub public_value1: u64,
    pub public_value2: u64,
    pub description: String,
    pub creator: Address,
    /// Creation time as recorded by the chain
    pub timestamp: DateTime<Utc>,
    /// Whether the on-chain verification has accepted a decrypted value
    pub verified: bool,
    /// Populated by the chain once `verified` flips
    pub decrypted_value: Option<u64>,
}

impl AccessRecord {
    /// The decrypted value, if verification has completed
    pub fn clear_value(&self) -> Option<u64> {
        if self.verified {
            self.decrypted_value
        } else {
            None
        }
    }
}

/// Transient creation-form input, cleared on successful submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub name: String,
    /// Numeric value as entered, validated on submission
    pub value: String,
    pub description: String,
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub name: String,
    pub value: u64,
    pub description: String,
}

impl RecordDraft {
    /// Validate the draft for submission
    ///
    /// The name must be non-empty and the value must parse as an unsigned
    /// integer. Invalid input is rejected rather than coerced to zero, so a
    /// typo cannot silently submit an encrypted 0 on-chain.
    pub fn validated(&self) -> Result<ValidDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DashboardError::InvalidDraft {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        let value = self
            .value
            .trim()
            .parse::<u64>()
            .map_err(|_| DashboardError::InvalidDraft {
                field: "value",
                reason: format!("`{}` is not an unsigned integer", self.value),
            })?;
        Ok(ValidDraft {
            name: name.to_string(),
            value,
            description: self.description.trim().to_string(),
        })
    }

    /// Reset all fields to empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
