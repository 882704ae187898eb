//! Dashboard orchestrator
//!
//! Sequences the async wallet/encryption/registry calls and applies every
//! state change through the reducers on [`DashboardState`]. Single logical
//! writer: state mutations happen under one lock acquisition, so observers
//! never see a half-applied transition. Overlapping refreshes are
//! last-write-wins on the cached collection; the registry is the source of
//! truth. Nothing is retried automatically, all recovery is user-initiated.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{
    AccessRecord, ActivityAction, ActivityEntry, ActivityStatus, Notification, NotificationId,
    NotificationKind, RecordDraft, RecordId, SummaryStats, ValidDraft,
};
use crate::infra::{
    CreateRecordRequest, DashboardError, EncryptionService, RegistryReader, RegistrySigner,
    Result, WalletConnector, WalletSession,
};

use super::{ControllerConfig, DashboardState};

/// Outcome of the decryption round-trip, before notification mapping
enum DecryptOutcome {
    /// The registry already holds a verified value; no round-trip happened
    AlreadyDone(Option<u64>),
    /// Off-chain decryption plus on-chain verification completed
    Verified(Option<u64>),
}

/// Client-state coordinator for the AccessGate dashboard
pub struct DashboardController {
    registry: Arc<dyn RegistryReader>,
    signer: Arc<dyn RegistrySigner>,
    encryption: Arc<dyn EncryptionService>,
    wallet: Arc<dyn WalletConnector>,
    state: Arc<RwLock<DashboardState>>,
    config: ControllerConfig,
}

impl DashboardController {
    pub fn new(
        registry: Arc<dyn RegistryReader>,
        signer: Arc<dyn RegistrySigner>,
        encryption: Arc<dyn EncryptionService>,
        wallet: Arc<dyn WalletConnector>,
        config: ControllerConfig,
    ) -> Self {
        let state = Arc::new(RwLock::new(DashboardState::new(&config)));
        Self {
            registry,
            signer,
            encryption,
            wallet,
            state,
            config,
        }
    }

    /// Shared handle to the view state
    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        Arc::clone(&self.state)
    }

    /// Clone of the full view state
    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    // ========================================================================
    // Session & initialization gate
    // ========================================================================

    /// Initialize the encryption subsystem for the connected session.
    ///
    /// No-op without a wallet session, and idempotent once the subsystem is
    /// ready. An initialization failure is logged and leaves the session
    /// not-ready (the UI keeps its loading state); it is not surfaced as a
    /// notification.
    #[instrument(skip(self))]
    pub async fn initialize_session(&self) -> Result<()> {
        if self.wallet.session().is_none() {
            debug!("no wallet session, skipping encryption init");
            return Ok(());
        }
        if self.state.read().await.encryption_ready {
            return Ok(());
        }

        if !self.encryption.is_initialized() {
            if let Err(err) = self.encryption.initialize().await {
                error!(error = %err, "encryption subsystem initialization failed");
                return Ok(());
            }
        }

        let mut state = self.state.write().await;
        state.encryption_ready = true;
        if !state.session_seeded {
            state.seed_session_activity(Utc::now());
        }
        info!("encryption subsystem ready");
        Ok(())
    }

    // ========================================================================
    // Record list loader
    // ========================================================================

    /// Fetch the record collection from the registry.
    ///
    /// Partial-success policy: a record whose detail fetch fails is logged
    /// and omitted; one bad record does not abort the load. On total failure
    /// the prior cached collection is left untouched and an error
    /// notification is shown.
    #[instrument(skip(self))]
    pub async fn load_records(&self) -> Result<()> {
        if self.wallet.session().is_none() {
            self.state.write().await.loading = false;
            return Ok(());
        }

        self.state.write().await.refreshing = true;
        let outcome = self.fetch_all_records().await;

        match outcome {
            Ok(records) => {
                let mut state = self.state.write().await;
                debug!(count = records.len(), "record collection refreshed");
                state.set_records(records, Utc::now());
                state.refreshing = false;
                state.loading = false;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "record load failed, keeping cached collection");
                {
                    let mut state = self.state.write().await;
                    state.refreshing = false;
                    state.loading = false;
                }
                self.notify(NotificationKind::Error, "Failed to load data")
                    .await;
                Err(err)
            }
        }
    }

    async fn fetch_all_records(&self) -> Result<Vec<AccessRecord>> {
        let ids = self.registry.all_record_ids().await?;
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.registry.record(&id).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    error!(record_id = %id, error = %err, "skipping record that failed to load");
                }
            }
        }
        Ok(records)
    }

    // ========================================================================
    // Record creation
    // ========================================================================

    /// Create a record from the current draft.
    ///
    /// Encrypts the draft value scoped to the contract and user addresses,
    /// submits the creation write under a fresh id, and awaits confirmation.
    /// On success the collection is refreshed, the form closed, and the
    /// draft cleared.
    #[instrument(skip(self))]
    pub async fn create_record(&self) -> Result<RecordId> {
        let Some(session) = self.wallet.session() else {
            self.notify(NotificationKind::Error, "Please connect wallet first")
                .await;
            return Err(DashboardError::WalletNotConnected);
        };

        let draft = self.state.read().await.draft.clone();
        let valid = match draft.validated() {
            Ok(valid) => valid,
            Err(err) => {
                self.notify(NotificationKind::Error, err.to_string()).await;
                return Err(err);
            }
        };

        self.state.write().await.creating = true;
        let outcome = self.submit_creation(&session, valid).await;

        match outcome {
            Ok(id) => {
                {
                    let mut state = self.state.write().await;
                    state.creating = false;
                    state.push_activity(
                        ActivityAction::Create,
                        id.as_str(),
                        ActivityStatus::Success,
                        Utc::now(),
                    );
                    state.close_create_form();
                    state.draft.clear();
                }
                self.notify_short(NotificationKind::Success, "Access record created!")
                    .await;
                if let Err(err) = self.load_records().await {
                    warn!(error = %err, "post-create refresh failed");
                }
                info!(record_id = %id, "record created");
                Ok(id)
            }
            Err(err) => {
                let message = if err.is_user_rejection() {
                    "Transaction rejected"
                } else {
                    "Creation failed"
                };
                {
                    let mut state = self.state.write().await;
                    state.creating = false;
                    state.push_activity(
                        ActivityAction::Create,
                        "new record",
                        ActivityStatus::Failed,
                        Utc::now(),
                    );
                }
                self.notify(NotificationKind::Error, message).await;
                Err(err)
            }
        }
    }

    async fn submit_creation(&self, session: &WalletSession, draft: ValidDraft) -> Result<RecordId> {
        self.notify(
            NotificationKind::Pending,
            "Creating encrypted access record...",
        )
        .await;

        let contract = self.signer.contract_address().await?;
        let encrypted = self
            .encryption
            .encrypt(&contract, &session.address, draft.value)
            .await?;

        let id = RecordId::generate();
        let tx = self
            .signer
            .create_record(CreateRecordRequest {
                id: id.clone(),
                name: draft.name,
                encrypted_data: encrypted.encrypted_data,
                proof: encrypted.proof,
                public_value1: 0,
                public_value2: 0,
                description: draft.description,
            })
            .await?;

        self.notify(NotificationKind::Pending, "Waiting for confirmation...")
            .await;
        tx.confirmed().await?;
        Ok(id)
    }

    // ========================================================================
    // Decryption / verification
    // ========================================================================

    /// Decrypt and verify a record's value.
    ///
    /// Short-circuits when the registry already holds a verified value. A
    /// failure whose cause is a concurrent verification is reclassified as
    /// success. Returns `Ok(None)` when there is no new clear value to merge
    /// into the detail view.
    #[instrument(skip(self, id), fields(record_id = %id))]
    pub async fn decrypt_record(&self, id: &RecordId) -> Result<Option<u64>> {
        if self.wallet.session().is_none() {
            self.notify(NotificationKind::Error, "Please connect wallet first")
                .await;
            return Err(DashboardError::WalletNotConnected);
        }

        self.state.write().await.decrypting = true;
        let outcome = self.run_decryption(id).await;
        self.state.write().await.decrypting = false;

        match outcome {
            Ok(DecryptOutcome::AlreadyDone(value)) => {
                self.notify(NotificationKind::Success, "Data already verified")
                    .await;
                Ok(value)
            }
            Ok(DecryptOutcome::Verified(value)) => {
                if let Err(err) = self.load_records().await {
                    warn!(error = %err, "post-decrypt refresh failed");
                }
                {
                    let mut state = self.state.write().await;
                    state.push_activity(
                        ActivityAction::Decrypt,
                        id.as_str(),
                        ActivityStatus::Success,
                        Utc::now(),
                    );
                }
                self.notify_short(NotificationKind::Success, "Data decrypted successfully!")
                    .await;
                Ok(value)
            }
            Err(err) if err.is_already_verified() => {
                // Lost the race to another verifier; the on-chain outcome is
                // the one we wanted anyway.
                info!(record_id = %id, "record verified concurrently");
                if let Err(err) = self.load_records().await {
                    warn!(error = %err, "post-verification refresh failed");
                }
                self.notify(NotificationKind::Success, "Data verified").await;
                Ok(None)
            }
            Err(err) => {
                warn!(record_id = %id, error = %err, "decryption failed");
                {
                    let mut state = self.state.write().await;
                    state.push_activity(
                        ActivityAction::Decrypt,
                        id.as_str(),
                        ActivityStatus::Failed,
                        Utc::now(),
                    );
                }
                self.notify(NotificationKind::Error, "Decryption failed").await;
                Ok(None)
            }
        }
    }

    async fn run_decryption(&self, id: &RecordId) -> Result<DecryptOutcome> {
        let record = self.registry.record(id).await?;
        if record.verified {
            return Ok(DecryptOutcome::AlreadyDone(record.decrypted_value));
        }

        let handle = self.registry.encrypted_value(id).await?;
        let contract = self.signer.contract_address().await?;
        let result = self
            .encryption
            .decrypt_with_proof(std::slice::from_ref(&handle), &contract)
            .await?;

        self.notify(NotificationKind::Pending, "Verifying decryption...")
            .await;
        let tx = self
            .signer
            .verify_decryption(id, &result.abi_encoded_values, &result.proof)
            .await?;
        tx.confirmed().await?;

        Ok(DecryptOutcome::Verified(
            result.clear_values.get(&handle).copied(),
        ))
    }

    // ========================================================================
    // Availability probe
    // ========================================================================

    /// Ask the registry whether the system is available
    #[instrument(skip(self))]
    pub async fn check_availability(&self) -> Result<bool> {
        match self.registry.is_available().await {
            Ok(available) => {
                {
                    let mut state = self.state.write().await;
                    state.push_activity(
                        ActivityAction::CheckAvailability,
                        "system",
                        ActivityStatus::Success,
                        Utc::now(),
                    );
                }
                self.notify(
                    NotificationKind::Success,
                    format!("System available: {available}"),
                )
                .await;
                Ok(available)
            }
            Err(err) => {
                warn!(error = %err, "availability check failed");
                self.notify(NotificationKind::Error, "Availability check failed")
                    .await;
                Err(err)
            }
        }
    }

    // ========================================================================
    // View-state accessors and form reducers
    // ========================================================================

    pub async fn stats(&self) -> SummaryStats {
        self.state.read().await.stats
    }

    /// Records matching the current search term
    pub async fn visible_records(&self) -> Vec<AccessRecord> {
        self.state
            .read()
            .await
            .visible_records()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.state.write().await.set_search_term(term);
    }

    pub async fn update_draft(&self, draft: RecordDraft) {
        self.state.write().await.draft = draft;
    }

    pub async fn open_create_form(&self) {
        self.state.write().await.open_create_form();
    }

    pub async fn close_create_form(&self) {
        self.state.write().await.close_create_form();
    }

    pub async fn activity(&self) -> Vec<ActivityEntry> {
        self.state.read().await.activity.iter().cloned().collect()
    }

    pub async fn current_notification(&self) -> Option<Notification> {
        self.state.read().await.current_notification().cloned()
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Publish a notification with the general auto-dismiss delay
    async fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.publish(kind, message, self.config.notice_ttl).await
    }

    /// Publish a notification with the short post-success delay
    async fn notify_short(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> NotificationId {
        self.publish(kind, message, self.config.success_notice_ttl)
            .await
    }

    async fn publish(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        ttl: Duration,
    ) -> NotificationId {
        let id = self
            .state
            .write()
            .await
            .publish_notification(kind, message);
        self.schedule_dismiss(id, ttl);
        id
    }

    /// Spawn the auto-dismiss for a published notification. The clear only
    /// takes effect if the id is still current, so a superseded timer is a
    /// no-op.
    fn schedule_dismiss(&self, id: NotificationId, after: Duration) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            state.write().await.clear_notification(id);
        });
    }
}
