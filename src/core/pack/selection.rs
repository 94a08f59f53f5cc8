//! Selection Handlers
//!
//! Toggle transitions for pack items and the voucher. Each transition computes
//! a single [`PackStatePatch`] so derived fields are always written together
//! with the selection they depend on.

use super::types::{DistributionType, ItemId, PackItemDraft, PackState, PackStatePatch, SelectionMap};

/// Outcome of toggling a pack item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemToggle {
    /// Item has no identifier; nothing changes
    Ignored,
    /// Selecting would exceed the item cap; nothing changes
    ExceededLimit { max: usize },
    Selected(PackStatePatch),
    Deselected(PackStatePatch),
}

/// Outcome of toggling the voucher
#[derive(Debug, Clone, PartialEq)]
pub enum VoucherToggle {
    Ignored,
    Selected { id: ItemId, patch: PackStatePatch },
    Cleared(PackStatePatch),
}

/// Add or remove `item` from the selected pack items.
///
/// Supply mode is taken from the toggled item, whether it was added or removed.
pub fn toggle_item(state: &PackState, item: &PackItemDraft, max_items: usize) -> ItemToggle {
    let Some(id) = item.id() else {
        return ItemToggle::Ignored;
    };

    let mut selected_items = state.selected_items.clone();
    let removed = selected_items.shift_remove(id).is_some();
    if !removed {
        if selected_items.len() >= max_items {
            return ItemToggle::ExceededLimit { max: max_items };
        }
        selected_items.insert(id.clone(), item.clone());
    }

    let is_unlimited_supply = item.has_unlimited_supply();
    let patch = PackStatePatch {
        selected_items: Some(selected_items),
        distribution_type: Some(DistributionType::from_unlimited(is_unlimited_supply)),
        is_unlimited_supply: Some(is_unlimited_supply),
        ..Default::default()
    };

    if removed {
        ItemToggle::Deselected(patch)
    } else {
        ItemToggle::Selected(patch)
    }
}

/// Select `item` as the only voucher, or clear it if it is already selected.
pub fn toggle_voucher(state: &PackState, item: &PackItemDraft) -> VoucherToggle {
    let Some(id) = item.id() else {
        return VoucherToggle::Ignored;
    };

    if state.selected_vouchers.contains_key(id) {
        let mut vouchers = state.selected_vouchers.clone();
        vouchers.shift_remove(id);
        return VoucherToggle::Cleared(PackStatePatch {
            selected_vouchers: Some(vouchers),
            ..Default::default()
        });
    }

    let mut vouchers = SelectionMap::new();
    vouchers.insert(id.clone(), item.clone());
    VoucherToggle::Selected {
        id: id.clone(),
        patch: PackStatePatch {
            selected_vouchers: Some(vouchers),
            ..Default::default()
        },
    }
}
