//! Step Controller
//!
//! Forward-only state machine over the four wizard steps. Advancing is gated by
//! [`validate_step`], which checks that the fields a step collects are set.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{DistributionType, PackError, PackState, PackValidationError};

/// Wizard steps in the order they are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackStep {
    #[default]
    SelectItems,
    SelectVoucher,
    AdjustQuantities,
    ReviewAndMint,
}

impl PackStep {
    pub const ALL: [PackStep; 4] = [
        PackStep::SelectItems,
        PackStep::SelectVoucher,
        PackStep::AdjustQuantities,
        PackStep::ReviewAndMint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PackStep::SelectItems => "select_items",
            PackStep::SelectVoucher => "select_voucher",
            PackStep::AdjustQuantities => "adjust_quantities",
            PackStep::ReviewAndMint => "review_and_mint",
        }
    }

    /// Human readable title shown in the header
    pub fn label(self) -> &'static str {
        match self {
            PackStep::SelectItems => "Add Items",
            PackStep::SelectVoucher => "Select Voucher",
            PackStep::AdjustQuantities => "Adjust Quantities",
            PackStep::ReviewAndMint => "Review & Mint",
        }
    }

    pub fn index(self) -> usize {
        PackStep::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<PackStep> {
        PackStep::ALL.get(self.index() + 1).copied()
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for PackStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PackStep {
    type Error = PackValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PackStep::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| PackValidationError::InvalidValue {
                field: "step".to_string(),
                reason: format!("unknown step '{value}'"),
            })
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Check that the fields required by `step` are set.
pub fn validate_step(state: &PackState, step: PackStep) -> Result<(), PackValidationError> {
    match step {
        PackStep::SelectItems => {
            if !state.has_items() {
                return Err(PackValidationError::IncompleteStep(
                    "Select at least one item".to_string(),
                ));
            }
        }
        PackStep::SelectVoucher => {
            if !state.has_voucher() {
                return Err(PackValidationError::IncompleteStep(
                    "Select a voucher".to_string(),
                ));
            }
        }
        PackStep::AdjustQuantities => {
            if state.allowed_amount_to_redeem == 0 {
                return Err(PackValidationError::InvalidValue {
                    field: "allowed_amount_to_redeem".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            for key in state.selected_items.keys() {
                match state.distribution_type {
                    DistributionType::Fixed => {
                        if state.supply_by_metadata_key.get(key).copied().unwrap_or(0) == 0 {
                            return Err(PackValidationError::IncompleteStep(format!(
                                "Missing supply for {key}"
                            )));
                        }
                    }
                    DistributionType::Unlimited => {
                        if state.weight_by_metadata_key.get(key).copied().unwrap_or(0) == 0 {
                            return Err(PackValidationError::IncompleteStep(format!(
                                "Missing weight for {key}"
                            )));
                        }
                    }
                }
            }
        }
        PackStep::ReviewAndMint => {
            state.validate_for_submission()?;
        }
    }
    Ok(())
}

pub fn is_valid_step(state: &PackState, step: PackStep) -> bool {
    validate_step(state, step).is_ok()
}

/// Only staying put or moving exactly one step forward is allowed.
pub fn validate_step_transition(from: PackStep, to: PackStep) -> Result<(), PackError> {
    if from == to || from.next() == Some(to) {
        return Ok(());
    }
    Err(PackError::InvalidTransition { from, to })
}

// ============================================================================
// Controller
// ============================================================================

/// Tracks the current step of a wizard session
#[derive(Debug, Clone, Default)]
pub struct StepController {
    current: PackStep,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PackStep {
        self.current
    }

    /// Move to the next step if the current one is valid for `state`.
    /// Leaves the step unchanged on error.
    pub fn advance(&mut self, state: &PackState) -> Result<PackStep, PackError> {
        let next = self
            .current
            .next()
            .ok_or(PackError::AlreadyAtFinalStep(self.current))?;
        self.go_to(next, state)
    }

    /// Move to `target`. Staying put always succeeds; moving on requires
    /// `target` to be the next step and the current one to be valid.
    pub fn go_to(&mut self, target: PackStep, state: &PackState) -> Result<PackStep, PackError> {
        validate_step_transition(self.current, target)?;
        if target != self.current {
            validate_step(state, self.current)?;
        }
        self.current = target;
        Ok(target)
    }

    pub fn reset(&mut self) {
        self.current = PackStep::SelectItems;
    }
}
