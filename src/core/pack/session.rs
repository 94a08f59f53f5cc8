//! Pack Creation Session
//!
//! [`PackCreateSession`] is the root of one wizard run. It owns the store, the
//! step controller, the submission orchestrator and the metadata requests, and
//! turns user actions into state transitions. Failures never escape a session
//! method: validation gaps are ignored, the item cap raises a notification and
//! submission errors are kept in [`SubmissionStatus`].

use std::sync::Arc;

use crate::config::PackConfig;

use super::events::{Notification, NotificationLevel};
use super::filters::FilterCache;
use super::metadata::MetadataRequests;
use super::selection::{self, ItemToggle, VoucherToggle};
use super::services::{PackServices, Wallet};
use super::steps::{self, PackStep, StepController};
use super::store::PackStore;
use super::submit::{SubmissionOrchestrator, SubmissionStatus, SubmitContext, SubmitOutcome};
use super::types::{PackError, PackItemDraft, PackState, PackStatePatch};
use super::view::{HeaderView, SidebarView, StepView, EMPTY_VOUCHER_MESSAGE};

/// Result of one [`PackCreateSession::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollStatus {
    /// A metadata lookup for the current voucher finished
    pub resolved: bool,
    /// Applying it changed the pack state
    pub changed: bool,
}

pub struct PackCreateSession {
    id: String,
    config: PackConfig,
    services: PackServices,
    store: PackStore,
    steps: StepController,
    submission: SubmissionOrchestrator,
    metadata: MetadataRequests,
    items: Vec<PackItemDraft>,
    items_revision: u64,
    filters: FilterCache,
}

impl PackCreateSession {
    pub fn new(services: PackServices, config: PackConfig) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(session_id = %id, max_items = config.max_items, "Pack session created");
        Self {
            id,
            config,
            services,
            store: PackStore::new(),
            steps: StepController::new(),
            submission: SubmissionOrchestrator::new(),
            metadata: MetadataRequests::new(),
            items: Vec::new(),
            items_revision: 0,
            filters: FilterCache::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &PackState {
        self.store.state()
    }

    pub fn step(&self) -> PackStep {
        self.steps.current()
    }

    // ========================================================================
    // Owned items
    // ========================================================================

    /// Fetch the user's owned items from the provider.
    pub async fn load(&mut self) -> Result<usize, PackError> {
        let items = self.services.items.owned_items().await?;
        let count = items.len();
        self.set_items(items);
        log::info!("Loaded {count} owned items");
        Ok(count)
    }

    /// Replace the owned-items list directly.
    pub fn set_items(&mut self, items: Vec<PackItemDraft>) {
        self.items = items;
        self.items_revision += 1;
    }

    pub fn owned_items(&self) -> &[PackItemDraft] {
        &self.items
    }

    fn refresh_filters(&mut self) {
        let state = self.store.state();
        self.filters.refresh(
            &self.items,
            self.items_revision,
            &state.selected_items,
            state.is_unlimited_supply,
            self.store.revision(),
        );
    }

    /// Candidates for the SelectItems step
    pub fn items_to_select(&mut self) -> Vec<PackItemDraft> {
        self.refresh_filters();
        self.filters.pack_candidates().to_vec()
    }

    /// Candidates for the SelectVoucher step
    pub fn vouchers_to_select(&mut self) -> Vec<PackItemDraft> {
        self.refresh_filters();
        self.filters.voucher_candidates().to_vec()
    }

    // ========================================================================
    // State updates
    // ========================================================================

    /// Merge a partial update, e.g. quantities edited in AdjustQuantities.
    pub fn set_pack_state(&mut self, patch: PackStatePatch) -> bool {
        self.store.merge(patch)
    }

    /// Apply finished metadata lookups. Call once per host tick.
    pub fn poll(&mut self) -> PollStatus {
        match self.metadata.drain() {
            Some(patch) => {
                log::debug!("Applying resolved voucher metadata");
                PollStatus {
                    resolved: true,
                    changed: self.store.merge(patch),
                }
            }
            None => PollStatus::default(),
        }
    }

    pub fn toggle_item(&mut self, item: &PackItemDraft) -> ItemToggle {
        let toggle = selection::toggle_item(self.store.state(), item, self.config.max_items);
        match &toggle {
            ItemToggle::Ignored => {
                log::debug!("Ignoring item without identifier");
            }
            ItemToggle::ExceededLimit { max } => {
                log::info!("Item limit of {max} reached");
                self.services.notifier.notify(Notification::exceeded_items_count(
                    *max,
                    self.config.notification_ttl_ticks,
                ));
            }
            ItemToggle::Selected(patch) | ItemToggle::Deselected(patch) => {
                self.store.merge(patch.clone());
            }
        }
        toggle
    }

    pub fn toggle_voucher(&mut self, item: &PackItemDraft) -> VoucherToggle {
        let toggle = selection::toggle_voucher(self.store.state(), item);
        match &toggle {
            VoucherToggle::Ignored => {
                log::debug!("Ignoring voucher without identifier");
            }
            VoucherToggle::Selected { id, patch } => {
                self.store.merge(patch.clone());
                self.metadata
                    .request(Arc::clone(&self.services.metadata), id.clone());
            }
            VoucherToggle::Cleared(patch) => {
                self.store.merge(patch.clone());
                self.metadata.cancel();
            }
        }
        toggle
    }

    // ========================================================================
    // Steps
    // ========================================================================

    pub fn is_valid_step(&self) -> bool {
        steps::is_valid_step(self.store.state(), self.steps.current())
    }

    /// Go to the next step. The step is unchanged on error.
    pub fn advance(&mut self) -> Result<PackStep, PackError> {
        let result = self.steps.advance(self.store.state());
        self.log_step_change(&result);
        result
    }

    /// Jump to `step`, e.g. from a header click. Only the current step or the
    /// next one is reachable.
    pub fn go_to_step(&mut self, step: PackStep) -> Result<PackStep, PackError> {
        let result = self.steps.go_to(step, self.store.state());
        self.log_step_change(&result);
        result
    }

    fn log_step_change(&self, result: &Result<PackStep, PackError>) {
        match result {
            Ok(step) => tracing::info!(session_id = %self.id, step = %step, "Wizard step changed"),
            Err(e) => log::debug!("Cannot leave {}: {e}", self.steps.current()),
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    pub fn set_wallet(&mut self, wallet: Option<Arc<dyn Wallet>>) {
        self.services.wallet = wallet;
    }

    /// Send the create-pack transaction. No-op unless a connected wallet, at
    /// least one item and a voucher are present.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let ctx = SubmitContext {
            wallet: self.services.wallet.as_ref(),
            connection: &self.services.connection,
            account_by_mint: &self.services.account_by_mint,
            transactions: self.services.transactions.as_ref(),
        };
        let outcome = self.submission.submit(ctx, self.store.state()).await;

        match &outcome {
            SubmitOutcome::Succeeded => {
                tracing::info!(session_id = %self.id, name = %self.store.state().name, "Pack submitted");
            }
            SubmitOutcome::Failed(message) => {
                self.services.notifier.notify(Notification {
                    message: format!("Failed to create pack: {message}"),
                    level: NotificationLevel::Error,
                    ttl_ticks: self.config.notification_ttl_ticks,
                });
            }
            SubmitOutcome::Skipped(_) => {}
        }
        outcome
    }

    pub fn is_loading(&self) -> bool {
        self.submission.is_in_flight()
    }

    pub fn should_show_success_modal(&self) -> bool {
        self.submission.should_show_success()
    }

    pub fn submission_status(&self) -> &SubmissionStatus {
        self.submission.status()
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission.error()
    }

    /// Dismiss the success modal: reset the wizard and go to the listing.
    pub fn finish(&mut self) {
        self.store.reset();
        self.steps.reset();
        self.submission.reset();
        self.metadata.cancel();
        self.services.navigator.navigate(&self.config.listing_route);
        tracing::info!(session_id = %self.id, "Pack wizard finished");
    }

    // ========================================================================
    // View models
    // ========================================================================

    pub fn header_view(&self) -> HeaderView {
        HeaderView::from(self.steps.current())
    }

    pub fn sidebar_view(&self) -> SidebarView {
        let step = self.steps.current();
        SidebarView {
            step,
            is_valid_step: self.is_valid_step(),
            button_loading: self.is_loading(),
            can_submit: step.is_last() && self.is_valid_step() && !self.is_loading(),
        }
    }

    /// Props for the component of the current step
    pub fn step_view(&mut self) -> StepView {
        self.refresh_filters();
        let state = self.store.state();
        match self.steps.current() {
            PackStep::SelectItems => StepView::SelectItems {
                items: self.filters.pack_candidates().to_vec(),
                selected_items: state.selected_items.clone(),
            },
            PackStep::SelectVoucher => StepView::SelectVoucher {
                items: self.filters.voucher_candidates().to_vec(),
                selected_items: state.selected_vouchers.clone(),
                show_supply: true,
                empty_message: EMPTY_VOUCHER_MESSAGE,
            },
            PackStep::AdjustQuantities => StepView::AdjustQuantities {
                allowed_amount_to_redeem: state.allowed_amount_to_redeem,
                selected_items: state.selected_items.clone(),
                distribution_type: state.distribution_type,
                weight_by_metadata_key: state.weight_by_metadata_key.clone(),
                supply_by_metadata_key: state.supply_by_metadata_key.clone(),
                is_unlimited: state.is_unlimited_supply,
            },
            PackStep::ReviewAndMint => StepView::ReviewAndMint {
                uri: state.uri.clone(),
                name: state.name.clone(),
                description: state.description.clone(),
                distribution_type: state.distribution_type,
                allowed_amount_to_redeem: state.allowed_amount_to_redeem,
                supply_by_metadata_key: state.supply_by_metadata_key.clone(),
            },
        }
    }
}
