//! Submission Orchestrator
//!
//! Hands the finished [`PackState`] to the transaction builder. The session-scoped
//! [`SubmissionStatus`] replaces a bare loading flag: a second submit while one is
//! in flight is rejected, and a failure keeps its message for the host to show.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::services::{AccountByMint, Connection, CreatePackRequest, TransactionBuilder, Wallet};
use super::types::PackState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed { message: String },
}

/// Why a submit call did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoWallet,
    WalletNotConnected,
    NoItems,
    NoVoucher,
    InFlight,
    AlreadySubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Preconditions not met, the builder was not called
    Skipped(SkipReason),
    Succeeded,
    Failed(String),
}

/// Collaborators borrowed for one submission
pub struct SubmitContext<'a> {
    pub wallet: Option<&'a Arc<dyn Wallet>>,
    pub connection: &'a Connection,
    pub account_by_mint: &'a AccountByMint,
    pub transactions: &'a dyn TransactionBuilder,
}

#[derive(Debug, Default)]
pub struct SubmissionOrchestrator {
    status: SubmissionStatus,
}

impl SubmissionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Success modal visibility
    pub fn should_show_success(&self) -> bool {
        self.status == SubmissionStatus::Succeeded
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    fn check_preconditions<'a>(
        &self,
        ctx: &SubmitContext<'a>,
        state: &PackState,
    ) -> Result<&'a Arc<dyn Wallet>, SkipReason> {
        if self.is_in_flight() {
            return Err(SkipReason::InFlight);
        }
        if self.should_show_success() {
            return Err(SkipReason::AlreadySubmitted);
        }
        let wallet = ctx.wallet.ok_or(SkipReason::NoWallet)?;
        if wallet.public_key().is_none() {
            return Err(SkipReason::WalletNotConnected);
        }
        if !state.has_items() {
            return Err(SkipReason::NoItems);
        }
        if !state.has_voucher() {
            return Err(SkipReason::NoVoucher);
        }
        Ok(wallet)
    }

    /// Send the create-pack transaction for `state`.
    ///
    /// Never returns an error: failures are logged and recorded in the status.
    pub async fn submit(&mut self, ctx: SubmitContext<'_>, state: &PackState) -> SubmitOutcome {
        let wallet = match self.check_preconditions(&ctx, state) {
            Ok(wallet) => wallet,
            Err(reason) => {
                log::debug!("Submit skipped: {reason:?}");
                return SubmitOutcome::Skipped(reason);
            }
        };

        self.status = SubmissionStatus::Submitting;
        tracing::info!(
            items = state.selected_items.len(),
            distribution = ?state.distribution_type,
            endpoint = %ctx.connection.endpoint,
            "Submitting create-pack transaction"
        );

        let request = CreatePackRequest {
            wallet: wallet.as_ref(),
            connection: ctx.connection,
            account_by_mint: ctx.account_by_mint,
            data: state,
        };

        match ctx.transactions.send_create_pack(request).await {
            Ok(()) => {
                log::info!("Pack created");
                self.status = SubmissionStatus::Succeeded;
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                log::error!("Failed to create pack: {e}");
                let message = e.to_string();
                self.status = SubmissionStatus::Failed {
                    message: message.clone(),
                };
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub fn reset(&mut self) {
        self.status = SubmissionStatus::Idle;
    }
}
