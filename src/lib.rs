//! AccessGate Client Library
//!
//! Client-side state coordinator for the AccessGate encrypted access-control
//! registry. Users connect a wallet, create access records whose numeric
//! value is encrypted before submission, and later request on-chain
//! verification/decryption of that value. All cryptography and chain logic
//! live behind external collaborators; this crate owns the view state, the
//! sequencing of the async calls between them, and the derived read models.
//!
//! ## Modules
//!
//! - [`domain`] - Core domain types (records, activity log, stats, notifications)
//! - [`infra`] - Collaborator seams (registry, signer, encryption, wallet) and errors
//! - [`controller`] - The dashboard state store and async orchestrator
//! - [`telemetry`] - Log/tracing initialization

pub mod controller;
pub mod domain;
pub mod infra;
pub mod telemetry;

// Re-export commonly used types
pub use domain::{
    filter_records, AccessRecord, ActivityAction, ActivityEntry, ActivityLog, ActivityStatus,
    Address, EncryptedHandle, Notification, NotificationId, NotificationKind, NotificationSlot,
    RecordDraft, RecordId, SummaryStats, ValidDraft,
};

pub use infra::{
    CreateRecordRequest, DashboardError, DecryptionResult, EncryptedInput, EncryptionService,
    PendingTransaction, RegistryReader, RegistrySigner, Result, TxReceipt, WalletConnector,
    WalletSession,
};

pub use controller::{ControllerConfig, DashboardController, DashboardState};
