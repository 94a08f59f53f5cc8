use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::events::Notification;
use super::types::{ItemId, PackItemDraft, PackState, ResolvedMetadata};

/// Token mint → owned token account address
pub type AccountByMint = HashMap<String, String>;

/// Errors reported by external collaborators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Wallet not connected")]
    WalletNotConnected,
    #[error("Transaction failed: {0}")]
    Transaction(String),
    #[error("Metadata lookup failed: {0}")]
    Metadata(String),
    #[error("Item provider error: {0}")]
    Items(String),
}

/// Network handle passed through to the transaction builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub endpoint: String,
}

impl Connection {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

/// Signing context. Signing itself happens inside the transaction builder.
#[cfg_attr(test, mockall::automock)]
pub trait Wallet: Send + Sync {
    /// `None` while the wallet is not connected
    fn public_key(&self) -> Option<String>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnedItemsProvider: Send + Sync {
    /// All items the user owns that may serve as pack items or vouchers
    async fn owned_items(&self) -> Result<Vec<PackItemDraft>, ServiceError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// `Ok(None)` when the metadata cannot be resolved (yet)
    async fn resolve(&self, id: &ItemId) -> Result<Option<ResolvedMetadata>, ServiceError>;
}

/// Everything the transaction builder needs to create a pack
pub struct CreatePackRequest<'a> {
    pub wallet: &'a dyn Wallet,
    pub connection: &'a Connection,
    pub account_by_mint: &'a AccountByMint,
    pub data: &'a PackState,
}

#[async_trait]
pub trait TransactionBuilder: Send + Sync {
    /// Compose, sign and send the create-pack transactions
    async fn send_create_pack<'a>(&self, request: CreatePackRequest<'a>) -> Result<(), ServiceError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Centralized handle to the collaborators a wizard session talks to.
///
/// Created by the host, then handed to [`super::PackCreateSession`]. All fields are
/// cheap to clone.
#[derive(Clone)]
pub struct PackServices {
    /// `None` until the user connects a wallet
    pub wallet: Option<Arc<dyn Wallet>>,
    pub connection: Connection,
    pub account_by_mint: AccountByMint,
    pub items: Arc<dyn OwnedItemsProvider>,
    pub metadata: Arc<dyn MetadataResolver>,
    pub transactions: Arc<dyn TransactionBuilder>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}
