//! Test Fixtures
//!
//! Provides shared helpers for creating items, states and sessions wired to
//! recording collaborators.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::PackConfig;
use crate::core::pack::{
    AccountByMint, AppEvent, Connection, EventNavigator, EventNotifier, ItemId, ItemMetadata,
    MasterEditionInfo, MetadataResolver, MockWallet, PackCreateSession, PackItemDraft,
    PackServices, Wallet,
};
use crate::core::pack::dry_run::StaticItems;

use crate::tests::mocks::{RecordingTransactionBuilder, SlowMetadata};

// =============================================================================
// Item Fixtures
// =============================================================================

/// Item with an identifier and a master edition with `max_supply`.
pub fn item(id: &str, max_supply: Option<u64>) -> PackItemDraft {
    PackItemDraft {
        metadata: ItemMetadata {
            pubkey: Some(ItemId::new(id)),
            mint: Some(format!("mint-{id}")),
            name: Some(format!("Item {id}")),
            uri: None,
        },
        master_edition: Some(MasterEditionInfo { supply: 1, max_supply }),
    }
}

/// `count` fixed-supply items named `item-0..count`.
pub fn fixed_items(count: usize) -> Vec<PackItemDraft> {
    (0..count).map(|i| item(&format!("item-{i}"), Some(10))).collect()
}

// =============================================================================
// Wallet Fixtures
// =============================================================================

pub fn connected_wallet() -> Arc<dyn Wallet> {
    let mut wallet = MockWallet::new();
    wallet
        .expect_public_key()
        .returning(|| Some("Wa11et1111111111111111111111111111111111111".to_string()));
    Arc::new(wallet)
}

// =============================================================================
// Session Fixtures
// =============================================================================

/// A session plus handles for inspecting its side effects.
pub struct TestSession {
    pub session: PackCreateSession,
    pub builder: Arc<RecordingTransactionBuilder>,
    pub events: mpsc::UnboundedReceiver<AppEvent>,
}

impl TestSession {
    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    pub fn notification_count(events: &[AppEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, AppEvent::Notification(_)))
            .count()
    }
}

/// Create a session with a connected wallet and a succeeding builder.
pub fn create_test_session(items: Vec<PackItemDraft>, max_items: usize) -> TestSession {
    create_session_with(
        items,
        max_items,
        Some(connected_wallet()),
        Arc::new(RecordingTransactionBuilder::ok()),
        Arc::new(SlowMetadata::instant()),
    )
}

pub fn create_session_with(
    items: Vec<PackItemDraft>,
    max_items: usize,
    wallet: Option<Arc<dyn Wallet>>,
    builder: Arc<RecordingTransactionBuilder>,
    metadata: Arc<dyn MetadataResolver>,
) -> TestSession {
    let (tx, rx) = mpsc::unbounded_channel();
    let services = PackServices {
        wallet,
        connection: Connection::new("http://localhost:8899"),
        account_by_mint: AccountByMint::new(),
        items: Arc::new(StaticItems::new(items.clone())),
        metadata,
        transactions: builder.clone(),
        navigator: Arc::new(EventNavigator::new(tx.clone())),
        notifier: Arc::new(EventNotifier::new(tx)),
    };
    let config = PackConfig {
        max_items,
        ..PackConfig::default()
    };

    let mut session = PackCreateSession::new(services, config);
    session.set_items(items);

    TestSession {
        session,
        builder,
        events: rx,
    }
}
