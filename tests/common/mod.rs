//! Common test utilities and fixtures for integration tests
//!
//! Provides an in-memory fake of the registry contract plus fake encryption
//! and wallet collaborators, wired closely enough that the full
//! create/load/decrypt lifecycle round-trips: `encrypt` embeds the clear
//! value in the ciphertext marker, the fake chain stores it behind the
//! handle, and `decrypt_with_proof` recovers it.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use accessgate_client::{
    AccessRecord, Address, ControllerConfig, CreateRecordRequest, DashboardController,
    DashboardError, DecryptionResult, EncryptedHandle, EncryptedInput, EncryptionService,
    PendingTransaction, RecordId, RegistryReader, RegistrySigner, Result, TxReceipt,
    WalletConnector, WalletSession,
};

pub fn user_address() -> Address {
    Address::new("0x1111111111111111111111111111111111111111")
}

pub fn contract_address() -> Address {
    Address::new("0x2222222222222222222222222222222222222222")
}

// ============================================================================
// In-memory chain shared by the fake registry and fake signer
// ============================================================================

/// Fake on-chain registry state with failure injection
#[derive(Default)]
pub struct InMemoryChain {
    records: Mutex<Vec<AccessRecord>>,
    /// Ids whose detail fetch fails
    pub failing_ids: Mutex<HashSet<String>>,
    /// Make `all_record_ids` fail entirely
    pub fail_listing: AtomicBool,
    /// Make every signer write fail as a user rejection
    pub reject_writes: AtomicBool,
    /// Number of `all_record_ids` calls observed
    pub list_calls: AtomicUsize,
}

impl InMemoryChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, record: AccessRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn fail_id(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    fn find(&self, id: &RecordId) -> Result<AccessRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| DashboardError::RecordNotFound(id.clone()))
    }
}

fn handle_for(id: &RecordId, hidden_value: u64) -> EncryptedHandle {
    EncryptedHandle::new(format!("h:{}:{hidden_value}", id.as_str()))
}

fn value_behind(handle: &EncryptedHandle) -> Result<u64> {
    handle
        .as_str()
        .rsplit(':')
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| DashboardError::Decryption("malformed handle".to_string()))
}

/// Build a registry record directly (bypassing the create flow)
pub fn seeded_record(id: &str, name: &str, description: &str, hidden_value: u64) -> AccessRecord {
    let record_id = RecordId::new(id);
    AccessRecord {
        encrypted_value: handle_for(&record_id, hidden_value),
        id: record_id,
        name: name.to_string(),
        public_value1: 0,
        public_value2: 0,
        description: description.to_string(),
        creator: user_address(),
        timestamp: Utc::now(),
        verified: false,
        decrypted_value: None,
    }
}

// ============================================================================
// Fake collaborators
// ============================================================================

pub struct FakeRegistry {
    chain: Arc<InMemoryChain>,
}

#[async_trait]
impl RegistryReader for FakeRegistry {
    async fn all_record_ids(&self) -> Result<Vec<RecordId>> {
        self.chain.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.chain.fail_listing.load(Ordering::SeqCst) {
            return Err(DashboardError::RegistryUnavailable(
                "provider timeout".to_string(),
            ));
        }
        Ok(self
            .chain
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id.clone())
            .collect())
    }

    async fn record(&self, id: &RecordId) -> Result<AccessRecord> {
        if self.chain.failing_ids.lock().unwrap().contains(id.as_str()) {
            return Err(DashboardError::RegistryUnavailable(
                "call reverted".to_string(),
            ));
        }
        self.chain.find(id)
    }

    async fn encrypted_value(&self, id: &RecordId) -> Result<EncryptedHandle> {
        Ok(self.chain.find(id)?.encrypted_value)
    }

    async fn is_available(&self) -> Result<bool> {
        Ok(!self.chain.fail_listing.load(Ordering::SeqCst))
    }
}

struct FakeTx;

#[async_trait]
impl PendingTransaction for FakeTx {
    async fn confirmed(&self) -> Result<TxReceipt> {
        Ok(TxReceipt {
            tx_hash: "0xfaketx".to_string(),
        })
    }
}

pub struct FakeSigner {
    chain: Arc<InMemoryChain>,
}

#[async_trait]
impl RegistrySigner for FakeSigner {
    async fn contract_address(&self) -> Result<Address> {
        Ok(contract_address())
    }

    async fn create_record(
        &self,
        request: CreateRecordRequest,
    ) -> Result<Box<dyn PendingTransaction>> {
        if self.chain.reject_writes.load(Ordering::SeqCst) {
            return Err(DashboardError::Transaction(
                "user rejected the request".to_string(),
            ));
        }
        let hidden_value = request
            .encrypted_data
            .strip_prefix("ct:")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| DashboardError::Transaction("malformed ciphertext".to_string()))?;
        self.chain.insert(AccessRecord {
            encrypted_value: handle_for(&request.id, hidden_value),
            id: request.id,
            name: request.name,
            public_value1: request.public_value1,
            public_value2: request.public_value2,
            description: request.description,
            creator: user_address(),
            timestamp: Utc::now(),
            verified: false,
            decrypted_value: None,
        });
        Ok(Box::new(FakeTx))
    }

    async fn verify_decryption(
        &self,
        id: &RecordId,
        clear_values: &str,
        _proof: &str,
    ) -> Result<Box<dyn PendingTransaction>> {
        if self.chain.reject_writes.load(Ordering::SeqCst) {
            return Err(DashboardError::Transaction(
                "user rejected the request".to_string(),
            ));
        }
        let value: u64 = clear_values
            .strip_prefix("abi:")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| DashboardError::Transaction("malformed clear values".to_string()))?;

        let mut records = self.chain.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| DashboardError::RecordNotFound(id.clone()))?;
        if record.verified {
            return Err(DashboardError::Transaction(
                "execution reverted: record already verified".to_string(),
            ));
        }
        record.verified = true;
        record.decrypted_value = Some(value);
        Ok(Box::new(FakeTx))
    }
}

#[derive(Default)]
pub struct FakeEncryption {
    initialized: AtomicBool,
    /// Make `initialize` fail
    pub fail_init: AtomicBool,
    pub init_calls: AtomicUsize,
}

#[async_trait]
impl EncryptionService for FakeEncryption {
    async fn initialize(&self) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(DashboardError::EncryptionInit(
                "wasm load failed".to_string(),
            ));
        }
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn encrypt(
        &self,
        _contract: &Address,
        _user: &Address,
        value: u64,
    ) -> Result<EncryptedInput> {
        Ok(EncryptedInput {
            encrypted_data: format!("ct:{value}"),
            proof: "proof".to_string(),
        })
    }

    async fn decrypt_with_proof(
        &self,
        handles: &[EncryptedHandle],
        _contract: &Address,
    ) -> Result<DecryptionResult> {
        let mut clear_values = HashMap::new();
        let mut last = 0;
        for handle in handles {
            let value = value_behind(handle)?;
            clear_values.insert(handle.clone(), value);
            last = value;
        }
        Ok(DecryptionResult {
            clear_values,
            abi_encoded_values: format!("abi:{last}"),
            proof: "dproof".to_string(),
        })
    }
}

pub struct FakeWallet {
    session: Option<WalletSession>,
}

impl FakeWallet {
    pub fn connected() -> Self {
        Self {
            session: Some(WalletSession {
                address: user_address(),
            }),
        }
    }

    pub fn disconnected() -> Self {
        Self { session: None }
    }
}

impl WalletConnector for FakeWallet {
    fn session(&self) -> Option<WalletSession> {
        self.session.clone()
    }
}

// ============================================================================
// Wiring
// ============================================================================

/// A fully wired controller plus handles to its fakes
pub struct TestEnv {
    pub chain: Arc<InMemoryChain>,
    pub encryption: Arc<FakeEncryption>,
    pub controller: DashboardController,
}

pub fn connected_env() -> TestEnv {
    env_with_wallet(FakeWallet::connected())
}

pub fn disconnected_env() -> TestEnv {
    env_with_wallet(FakeWallet::disconnected())
}

fn env_with_wallet(wallet: FakeWallet) -> TestEnv {
    let chain = InMemoryChain::new();
    let encryption = Arc::new(FakeEncryption::default());
    let controller = DashboardController::new(
        Arc::new(FakeRegistry {
            chain: Arc::clone(&chain),
        }),
        Arc::new(FakeSigner {
            chain: Arc::clone(&chain),
        }),
        Arc::clone(&encryption) as Arc<dyn EncryptionService>,
        Arc::new(wallet),
        ControllerConfig::default(),
    );
    TestEnv {
        chain,
        encryption,
        controller,
    }
}
