//! View Composition
//!
//! Props for the component the host renders at each step. Nothing here draws;
//! the host decides how a [`StepView`] looks.

use indexmap::IndexMap;
use serde::Serialize;

use super::steps::PackStep;
use super::types::{DistributionType, ItemId, PackItemDraft, SelectionMap};

pub const EMPTY_VOUCHER_MESSAGE: &str =
    "You need to have minted supply of NFT to use it as a voucher.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepView {
    SelectItems {
        items: Vec<PackItemDraft>,
        selected_items: SelectionMap,
    },
    SelectVoucher {
        items: Vec<PackItemDraft>,
        selected_items: SelectionMap,
        show_supply: bool,
        empty_message: &'static str,
    },
    AdjustQuantities {
        allowed_amount_to_redeem: u32,
        selected_items: SelectionMap,
        distribution_type: DistributionType,
        weight_by_metadata_key: IndexMap<ItemId, u32>,
        supply_by_metadata_key: IndexMap<ItemId, u64>,
        is_unlimited: bool,
    },
    ReviewAndMint {
        uri: String,
        name: String,
        description: String,
        distribution_type: DistributionType,
        allowed_amount_to_redeem: u32,
        supply_by_metadata_key: IndexMap<ItemId, u64>,
    },
}

impl StepView {
    pub fn step(&self) -> PackStep {
        match self {
            StepView::SelectItems { .. } => PackStep::SelectItems,
            StepView::SelectVoucher { .. } => PackStep::SelectVoucher,
            StepView::AdjustQuantities { .. } => PackStep::AdjustQuantities,
            StepView::ReviewAndMint { .. } => PackStep::ReviewAndMint,
        }
    }
}

/// Sidebar props: step list position and the next/submit button state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub step: PackStep,
    pub is_valid_step: bool,
    pub button_loading: bool,
    /// Final step reached; the button submits instead of advancing
    pub can_submit: bool,
}

/// Header props
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub step: PackStep,
    pub title: &'static str,
    pub position: usize,
    pub total: usize,
}

impl From<PackStep> for HeaderView {
    fn from(step: PackStep) -> Self {
        Self {
            step,
            title: step.label(),
            position: step.index() + 1,
            total: PackStep::ALL.len(),
        }
    }
}
