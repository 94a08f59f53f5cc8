//! Selection Filters
//!
//! Partition the user's owned items into pack item candidates and voucher
//! candidates. Both filters are pure; [`FilterCache`] memoizes their output on
//! the owned-items and state revisions.

use super::types::{PackItemDraft, SelectionMap};

/// Items that can still be added to the pack.
///
/// Already selected items are excluded. While the pack is in unlimited mode only
/// items without a max supply remain compatible.
pub fn items_eligible_as_pack(
    all: &[PackItemDraft],
    selected: &SelectionMap,
    is_unlimited_supply: bool,
) -> Vec<PackItemDraft> {
    all.iter()
        .filter(|item| match item.id() {
            Some(id) => !selected.contains_key(id),
            None => false,
        })
        .filter(|item| !is_unlimited_supply || item.has_unlimited_supply())
        .cloned()
        .collect()
}

/// Items that can be picked as the voucher: anything not already a pack item.
pub fn items_eligible_as_voucher(
    all: &[PackItemDraft],
    selected: &SelectionMap,
) -> Vec<PackItemDraft> {
    all.iter()
        .filter(|item| match item.id() {
            Some(id) => !selected.contains_key(id),
            None => false,
        })
        .cloned()
        .collect()
}

/// Revision pair the cached lists were computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    items_revision: u64,
    state_revision: u64,
}

/// Memoized filter output
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<CacheKey>,
    pack_candidates: Vec<PackItemDraft>,
    voucher_candidates: Vec<PackItemDraft>,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute both lists unless the revisions match the cached ones.
    ///
    /// Returns `true` if a recomputation happened.
    pub fn refresh(
        &mut self,
        all: &[PackItemDraft],
        items_revision: u64,
        selected: &SelectionMap,
        is_unlimited_supply: bool,
        state_revision: u64,
    ) -> bool {
        let key = CacheKey {
            items_revision,
            state_revision,
        };
        if self.key == Some(key) {
            return false;
        }
        self.pack_candidates = items_eligible_as_pack(all, selected, is_unlimited_supply);
        self.voucher_candidates = items_eligible_as_voucher(all, selected);
        self.key = Some(key);
        true
    }

    pub fn pack_candidates(&self) -> &[PackItemDraft] {
        &self.pack_candidates
    }

    pub fn voucher_candidates(&self) -> &[PackItemDraft] {
        &self.voucher_candidates
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
