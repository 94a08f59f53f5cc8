//! Property-based tests for the Step Controller
//!
//! Tests invariants:
//! - Never advances from an invalid step
//! - Only moves forward, one step at a time

use proptest::prelude::*;

use crate::core::pack::{
    is_valid_step, validate_step_transition, ItemId, ItemMetadata, PackItemDraft, PackState,
    PackStep, SelectionMap, StepController,
};

fn arb_step() -> impl Strategy<Value = PackStep> {
    prop::sample::select(PackStep::ALL.to_vec())
}

/// Generate a state with a random subset of the required fields set
fn arb_state() -> impl Strategy<Value = PackState> {
    (any::<bool>(), any::<bool>(), 0u32..3, 0u64..3).prop_map(
        |(with_item, with_voucher, redeem, supply)| {
            let mut state = PackState {
                allowed_amount_to_redeem: redeem,
                ..Default::default()
            };
            let draft = |id: &str| PackItemDraft {
                metadata: ItemMetadata {
                    pubkey: Some(ItemId::new(id)),
                    ..Default::default()
                },
                master_edition: None,
            };
            if with_item {
                state.selected_items.insert(ItemId::new("a"), draft("a"));
                state.supply_by_metadata_key.insert(ItemId::new("a"), supply);
            }
            if with_voucher {
                let mut vouchers = SelectionMap::new();
                vouchers.insert(ItemId::new("v"), draft("v"));
                state.selected_vouchers = vouchers;
            }
            state
        },
    )
}

proptest! {
    /// Property: Advancing succeeds exactly when the current step is valid
    #[test]
    fn prop_advance_requires_valid_step(
        states in prop::collection::vec(arb_state(), 1..12)
    ) {
        let mut controller = StepController::new();
        for state in &states {
            let before = controller.current();
            let valid = is_valid_step(state, before);

            match controller.advance(state) {
                Ok(next) => {
                    prop_assert!(valid);
                    prop_assert_eq!(Some(next), before.next());
                    prop_assert_eq!(controller.current(), next);
                }
                Err(_) => {
                    prop_assert!(!valid || before.is_last());
                    prop_assert_eq!(controller.current(), before);
                }
            }
        }
    }

    /// Property: Transitions may only stay or move one step forward
    #[test]
    fn prop_transitions_are_forward_only(
        from in arb_step(),
        to in arb_step()
    ) {
        let allowed = validate_step_transition(from, to).is_ok();
        prop_assert_eq!(allowed, to.index() == from.index() || to.index() == from.index() + 1);
    }
}
