//! Trait definitions for the AccessGate client collaborators
//!
//! Every external dependency of the controller sits behind one of these
//! seams, so the whole orchestration layer is testable without a wallet, a
//! chain, or the encryption SDK.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;

use crate::domain::{AccessRecord, Address, EncryptedHandle, RecordId};

use super::Result;

/// Read-only view of the registry contract.
///
/// Invariant: reads never mutate chain state; the registry is the source of
/// truth for every cached record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegistryReader: Send + Sync {
    /// All record identifiers known to the registry
    async fn all_record_ids(&self) -> Result<Vec<RecordId>>;

    /// Full record details for one identifier
    async fn record(&self, id: &RecordId) -> Result<AccessRecord>;

    /// Opaque handle to a record's encrypted value
    async fn encrypted_value(&self, id: &RecordId) -> Result<EncryptedHandle>;

    /// Liveness probe of the registry contract
    async fn is_available(&self) -> Result<bool>;
}

/// Receipt of a confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
}

/// A submitted transaction awaiting chain confirmation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PendingTransaction: Send + Sync {
    /// Wait for the transaction to confirm
    async fn confirmed(&self) -> Result<TxReceipt>;
}

/// Parameters for a record creation write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    pub id: RecordId,
    pub name: String,
    /// Ciphertext produced by [`EncryptionService::encrypt`]
    pub encrypted_data: String,
    /// Correctness proof for the ciphertext
    pub proof: String,
    pub public_value1: u64,
    pub public_value2: u64,
    pub description: String,
}

/// Signer-backed registry contract.
///
/// Writes go through the connected wallet; each returns a pending
/// transaction that must be awaited for confirmation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegistrySigner: Send + Sync {
    /// Address of the registry contract instance
    async fn contract_address(&self) -> Result<Address>;

    /// Submit a record creation
    async fn create_record(
        &self,
        request: CreateRecordRequest,
    ) -> Result<Box<dyn PendingTransaction>>;

    /// Submit clear values plus decryption proof for on-chain verification
    async fn verify_decryption(
        &self,
        id: &RecordId,
        clear_values: &str,
        proof: &str,
    ) -> Result<Box<dyn PendingTransaction>>;
}

/// Ciphertext plus correctness proof for a single value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedInput {
    pub encrypted_data: String,
    pub proof: String,
}

/// Outcome of an off-chain decryption round-trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionResult {
    /// Clear value per requested handle
    pub clear_values: HashMap<EncryptedHandle, u64>,
    /// ABI-encoded clear values, ready for on-chain submission
    pub abi_encoded_values: String,
    /// Decryption correctness proof
    pub proof: String,
}

/// The external encryption subsystem.
///
/// Must be initialized once per connected session before `encrypt` or
/// `decrypt_with_proof` are called; initialization is idempotent at this
/// seam (`is_initialized` gates repeat calls).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EncryptionService: Send + Sync {
    /// One-time setup of the encryption runtime
    async fn initialize(&self) -> Result<()>;

    /// Whether [`EncryptionService::initialize`] has completed
    fn is_initialized(&self) -> bool;

    /// Encrypt `value` scoped to the contract and user addresses
    async fn encrypt(
        &self,
        contract: &Address,
        user: &Address,
        value: u64,
    ) -> Result<EncryptedInput>;

    /// Decrypt the given handles off-chain and produce a verification proof
    /// scoped to the contract address
    async fn decrypt_with_proof(
        &self,
        handles: &[EncryptedHandle],
        contract: &Address,
    ) -> Result<DecryptionResult>;
}

/// A connected wallet session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Address,
}

/// Wallet connection state
#[cfg_attr(test, automock)]
pub trait WalletConnector: Send + Sync {
    /// The current session, if a wallet is connected
    fn session(&self) -> Option<WalletSession>;
}
