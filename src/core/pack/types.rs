//! Pack Domain Types
//!
//! Defines the core domain types for the pack creation wizard:
//! - [`PackItemDraft`]: An owned NFT offered as a pack item or voucher candidate
//! - [`PackState`]: Accumulating draft state for the pack being created
//! - [`PackStatePatch`]: Partial update merged into [`PackState`]
//! - [`PackError`] / [`PackValidationError`]: Error types for wizard operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use pack_wizard::core::pack::{PackState, PackStatePatch};
//!
//! let state = PackState::default();
//! let named = state.merged(PackStatePatch {
//!     name: Some("Genesis Pack".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(named.name, "Genesis Pack");
//! ```
//!
//! # Serialization
//!
//! All types implement `Serialize` and `Deserialize` so a state snapshot can be
//! handed to the transaction builder or written out by the dry-run driver.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::services::ServiceError;
use super::steps::PackStep;

// ============================================================================
// Item Types
// ============================================================================

/// Stable identifier of an item (its metadata account address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// On-chain metadata of an owned item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemMetadata {
    /// Metadata account address; items without one cannot be selected
    pub pubkey: Option<ItemId>,
    /// Mint of the token backing this metadata
    pub mint: Option<String>,
    pub name: Option<String>,
    pub uri: Option<String>,
}

/// Master edition record describing how many prints can be minted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MasterEditionInfo {
    /// Prints minted so far
    pub supply: u64,
    /// Maximum prints; `None` means unlimited
    pub max_supply: Option<u64>,
}

/// An owned item as offered to the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PackItemDraft {
    pub metadata: ItemMetadata,
    #[serde(default)]
    pub master_edition: Option<MasterEditionInfo>,
}

impl PackItemDraft {
    /// Identifier used as the selection key
    pub fn id(&self) -> Option<&ItemId> {
        self.metadata.pubkey.as_ref()
    }

    /// An undefined max supply (or no master edition at all) is unlimited
    pub fn has_unlimited_supply(&self) -> bool {
        self.master_edition
            .as_ref()
            .and_then(|edition| edition.max_supply)
            .is_none()
    }
}

/// Metadata resolved for the selected voucher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResolvedMetadata {
    pub image: String,
    pub name: String,
    pub description: String,
}

// ============================================================================
// Distribution Type
// ============================================================================

/// How pack items are provisioned on redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistributionType {
    /// Items are printed without a supply cap, chosen by weight
    Unlimited,
    /// Each item has a fixed number of prints
    #[default]
    Fixed,
}

impl DistributionType {
    pub fn from_unlimited(is_unlimited_supply: bool) -> Self {
        if is_unlimited_supply {
            DistributionType::Unlimited
        } else {
            DistributionType::Fixed
        }
    }
}

// ============================================================================
// PackState - Wizard Draft
// ============================================================================

/// Selected items keyed by identifier
pub type SelectionMap = IndexMap<ItemId, PackItemDraft>;

/// Draft of the pack being created. Mutated only by merging a [`PackStatePatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackState {
    pub selected_items: SelectionMap,
    /// Holds zero or one voucher
    pub selected_vouchers: SelectionMap,
    pub distribution_type: DistributionType,
    pub weight_by_metadata_key: IndexMap<ItemId, u32>,
    pub supply_by_metadata_key: IndexMap<ItemId, u64>,
    pub allowed_amount_to_redeem: u32,
    pub name: String,
    pub description: String,
    pub uri: String,
    pub is_unlimited_supply: bool,
}

impl Default for PackState {
    fn default() -> Self {
        Self {
            selected_items: IndexMap::new(),
            selected_vouchers: IndexMap::new(),
            distribution_type: DistributionType::Fixed,
            weight_by_metadata_key: IndexMap::new(),
            supply_by_metadata_key: IndexMap::new(),
            allowed_amount_to_redeem: 1,
            name: String::new(),
            description: String::new(),
            uri: String::new(),
            is_unlimited_supply: false,
        }
    }
}

impl PackState {
    /// Return a new state with every field set in `patch` overwritten.
    pub fn merged(&self, patch: PackStatePatch) -> PackState {
        let mut next = self.clone();
        if let Some(v) = patch.selected_items {
            next.selected_items = v;
        }
        if let Some(v) = patch.selected_vouchers {
            next.selected_vouchers = v;
        }
        if let Some(v) = patch.distribution_type {
            next.distribution_type = v;
        }
        if let Some(v) = patch.weight_by_metadata_key {
            next.weight_by_metadata_key = v;
        }
        if let Some(v) = patch.supply_by_metadata_key {
            next.supply_by_metadata_key = v;
        }
        if let Some(v) = patch.allowed_amount_to_redeem {
            next.allowed_amount_to_redeem = v;
        }
        if let Some(v) = patch.name {
            next.name = v;
        }
        if let Some(v) = patch.description {
            next.description = v;
        }
        if let Some(v) = patch.uri {
            next.uri = v;
        }
        if let Some(v) = patch.is_unlimited_supply {
            next.is_unlimited_supply = v;
        }
        next
    }

    pub fn has_items(&self) -> bool {
        !self.selected_items.is_empty()
    }

    pub fn has_voucher(&self) -> bool {
        !self.selected_vouchers.is_empty()
    }

    /// Identifier of the selected voucher, if any
    pub fn selected_voucher_id(&self) -> Option<&ItemId> {
        self.selected_vouchers.keys().next()
    }

    /// Validate that all required fields for submission are present
    pub fn validate_for_submission(&self) -> Result<(), PackValidationError> {
        if !self.has_items() {
            return Err(PackValidationError::MissingField("selected_items".to_string()));
        }
        if !self.has_voucher() {
            return Err(PackValidationError::MissingField("selected_vouchers".to_string()));
        }
        Ok(())
    }
}

/// Partial update for [`PackState`]. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackStatePatch {
    pub selected_items: Option<SelectionMap>,
    pub selected_vouchers: Option<SelectionMap>,
    pub distribution_type: Option<DistributionType>,
    pub weight_by_metadata_key: Option<IndexMap<ItemId, u32>>,
    pub supply_by_metadata_key: Option<IndexMap<ItemId, u64>>,
    pub allowed_amount_to_redeem: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub uri: Option<String>,
    pub is_unlimited_supply: Option<bool>,
}

impl PackStatePatch {
    pub fn is_empty(&self) -> bool {
        *self == PackStatePatch::default()
    }
}

impl From<ResolvedMetadata> for PackStatePatch {
    fn from(data: ResolvedMetadata) -> Self {
        PackStatePatch {
            uri: Some(data.image),
            name: Some(data.name),
            description: Some(data.description),
            ..Default::default()
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during wizard operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum PackError {
    #[error("Invalid step transition: cannot move from {from} to {to}")]
    InvalidTransition { from: PackStep, to: PackStep },

    #[error("Already at the final step: {0}")]
    AlreadyAtFinalStep(PackStep),

    #[error("Validation error: {0}")]
    Validation(#[from] PackValidationError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Validation errors for wizard data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Incomplete step: {0}")]
    IncompleteStep(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ============================================================================
// Tests
// ============================================================================
