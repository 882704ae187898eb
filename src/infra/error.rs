//! Error types for the AccessGate client

use thiserror::Error;

use crate::domain::RecordId;

/// Errors that can occur while coordinating the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No wallet session is connected
    #[error("wallet not connected")]
    WalletNotConnected,

    /// The registry contract could not be reached
    #[error("registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// Record not found in the registry
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// Record is already verified on-chain
    #[error("record already verified: {0}")]
    AlreadyVerified(RecordId),

    /// Encryption subsystem failed to initialize
    #[error("encryption initialization failed: {0}")]
    EncryptionInit(String),

    /// Encryption of a value failed
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Off-chain decryption or proof generation failed
    #[error("decryption error: {0}")]
    Decryption(String),

    /// The signer refused to sign the transaction
    #[error("transaction rejected by signer")]
    TransactionRejected,

    /// Transaction submission or confirmation failed
    #[error("transaction failed: {0}")]
    Transaction(String),

    /// Draft input failed validation
    #[error("invalid {field}: {reason}")]
    InvalidDraft { field: &'static str, reason: String },

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Whether this failure is the user declining to sign
    ///
    /// The signer surfaces rejections either as the dedicated variant or as a
    /// raw provider message containing "rejected".
    pub fn is_user_rejection(&self) -> bool {
        match self {
            DashboardError::TransactionRejected => true,
            DashboardError::Transaction(message) => message.contains("rejected"),
            _ => false,
        }
    }

    /// Whether this failure means the record was concurrently verified
    ///
    /// Chain reverts arrive as raw message strings, so the variant check is
    /// backed by a message-content check.
    pub fn is_already_verified(&self) -> bool {
        match self {
            DashboardError::AlreadyVerified(_) => true,
            DashboardError::Transaction(message) | DashboardError::Decryption(message) => {
                message.contains("already verified")
            }
            _ => false,
        }
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
