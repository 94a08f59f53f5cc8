//! Dry-run collaborators
//!
//! Scenario-file driven implementations of the session's collaborators. The
//! transaction builder records the pack it would create instead of sending
//! anything, so a full wizard run can be rehearsed offline.
//!
//! A scenario is a JSON document:
//!
//! ```json
//! {
//!   "wallet": "Wa11et...",
//!   "items": [{ "metadata": { "pubkey": "item-1", "name": "Sword" },
//!               "master_edition": { "supply": 0, "max_supply": 10 } }],
//!   "metadata": { "voucher-1": { "image": "https://...", "name": "Pack", "description": "..." } },
//!   "pack_items": ["item-1"],
//!   "voucher": "voucher-1",
//!   "allowed_amount_to_redeem": 1,
//!   "supply_by_metadata_key": { "item-1": 10 }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::config::AppConfig;

use super::events::{AppEvent, EventNavigator, EventNotifier};
use super::services::{
    AccountByMint, Connection, CreatePackRequest, MetadataResolver, OwnedItemsProvider,
    PackServices, ServiceError, TransactionBuilder, Wallet,
};
use super::session::PackCreateSession;
use super::submit::{SubmissionStatus, SubmitOutcome};
use super::types::{ItemId, PackError, PackItemDraft, PackState, PackStatePatch, ResolvedMetadata};

/// How long to wait for voucher metadata before reviewing without it
const METADATA_WAIT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Scenario {
    /// Public key of the connected wallet; `None` runs disconnected
    pub wallet: Option<String>,
    pub items: Vec<PackItemDraft>,
    pub metadata: HashMap<ItemId, ResolvedMetadata>,
    pub account_by_mint: AccountByMint,
    pub pack_items: Vec<ItemId>,
    pub voucher: Option<ItemId>,
    pub allowed_amount_to_redeem: Option<u32>,
    pub weight_by_metadata_key: IndexMap<ItemId, u32>,
    pub supply_by_metadata_key: IndexMap<ItemId, u64>,
    /// Make the transaction builder fail with this message
    pub fail_transaction: Option<String>,
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self, PackError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PackError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| PackError::Config(format!("invalid scenario {}: {e}", path.display())))
    }
}

pub struct DryRunWallet {
    public_key: Option<String>,
}

impl DryRunWallet {
    pub fn new(public_key: Option<String>) -> Self {
        Self { public_key }
    }
}

impl Wallet for DryRunWallet {
    fn public_key(&self) -> Option<String> {
        self.public_key.clone()
    }
}

pub struct StaticItems {
    items: Vec<PackItemDraft>,
}

impl StaticItems {
    pub fn new(items: Vec<PackItemDraft>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl OwnedItemsProvider for StaticItems {
    async fn owned_items(&self) -> Result<Vec<PackItemDraft>, ServiceError> {
        Ok(self.items.clone())
    }
}

pub struct StaticMetadata {
    entries: HashMap<ItemId, ResolvedMetadata>,
}

impl StaticMetadata {
    pub fn new(entries: HashMap<ItemId, ResolvedMetadata>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl MetadataResolver for StaticMetadata {
    async fn resolve(&self, id: &ItemId) -> Result<Option<ResolvedMetadata>, ServiceError> {
        Ok(self.entries.get(id).cloned())
    }
}

/// Records each pack it is asked to create
#[derive(Default)]
pub struct DryRunTransactionBuilder {
    submitted: Mutex<Vec<PackState>>,
    fail_with: Option<String>,
}

impl DryRunTransactionBuilder {
    pub fn new(fail_with: Option<String>) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            fail_with,
        }
    }

    pub fn submitted(&self) -> Vec<PackState> {
        self.submitted
            .lock()
            .map(|packs| packs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TransactionBuilder for DryRunTransactionBuilder {
    async fn send_create_pack<'a>(&self, request: CreatePackRequest<'a>) -> Result<(), ServiceError> {
        let authority = request
            .wallet
            .public_key()
            .ok_or(ServiceError::WalletNotConnected)?;

        tracing::info!(
            authority = %authority,
            endpoint = %request.connection.endpoint,
            items = request.data.selected_items.len(),
            known_accounts = request.account_by_mint.len(),
            "Dry run: create pack"
        );

        if let Some(message) = &self.fail_with {
            return Err(ServiceError::Transaction(message.clone()));
        }

        match self.submitted.lock() {
            Ok(mut packs) => packs.push(request.data.clone()),
            Err(_) => return Err(ServiceError::Transaction("recorder poisoned".to_string())),
        }
        Ok(())
    }
}

/// Result of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct DryRunReport {
    pub session_id: String,
    /// Pack sent to the builder, if the run got that far
    pub submitted: Option<PackState>,
    pub status: SubmissionStatus,
    pub notifications: Vec<String>,
    pub navigated_to: Option<String>,
}

/// Walk a wizard session through `scenario` from item selection to finish.
pub async fn run_scenario(scenario: Scenario, config: &AppConfig) -> Result<DryRunReport, PackError> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let builder = Arc::new(DryRunTransactionBuilder::new(scenario.fail_transaction.clone()));

    let services = PackServices {
        wallet: Some(Arc::new(DryRunWallet::new(scenario.wallet.clone()))),
        connection: Connection::new(config.network.rpc_endpoint.clone()),
        account_by_mint: scenario.account_by_mint.clone(),
        items: Arc::new(StaticItems::new(scenario.items.clone())),
        metadata: Arc::new(StaticMetadata::new(scenario.metadata.clone())),
        transactions: builder.clone(),
        navigator: Arc::new(EventNavigator::new(event_tx.clone())),
        notifier: Arc::new(EventNotifier::new(event_tx)),
    };

    let mut session = PackCreateSession::new(services, config.pack.clone());
    session.load().await?;

    let find = |id: &ItemId| -> Result<PackItemDraft, PackError> {
        scenario
            .items
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
            .ok_or_else(|| PackError::Config(format!("scenario item {id} is not owned")))
    };

    for id in &scenario.pack_items {
        session.toggle_item(&find(id)?);
    }
    session.advance()?;

    if let Some(voucher) = &scenario.voucher {
        session.toggle_voucher(&find(voucher)?);
    }
    session.advance()?;

    session.set_pack_state(PackStatePatch {
        allowed_amount_to_redeem: scenario.allowed_amount_to_redeem,
        weight_by_metadata_key: Some(scenario.weight_by_metadata_key.clone()),
        supply_by_metadata_key: Some(scenario.supply_by_metadata_key.clone()),
        ..Default::default()
    });
    session.advance()?;

    let waited = tokio::time::timeout(METADATA_WAIT, async {
        while !session.poll().resolved {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await;
    if waited.is_err() {
        log::warn!("Voucher metadata not resolved, reviewing without it");
    }

    let outcome = session.submit().await;
    let status = session.submission_status().clone();
    if outcome == SubmitOutcome::Succeeded {
        session.finish();
    }

    let mut notifications = Vec::new();
    let mut navigated_to = None;
    while let Ok(event) = event_rx.try_recv() {
        match event {
            AppEvent::Notification(n) => notifications.push(n.message),
            AppEvent::Navigate(route) => navigated_to = Some(route),
        }
    }

    Ok(DryRunReport {
        session_id: session.id().to_string(),
        submitted: builder.submitted().into_iter().last(),
        status,
        notifications,
        navigated_to,
    })
}
