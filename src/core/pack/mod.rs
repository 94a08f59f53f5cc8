//! Pack Creation Wizard
//!
//! Drives the creation of an NFT pack: a bundle of items redeemable through a
//! voucher token.
//!
//! # Overview
//!
//! The wizard walks through four steps:
//! 1. Select Items - Pick the items the pack hands out
//! 2. Select Voucher - Pick the token that redeems the pack
//! 3. Adjust Quantities - Supply or weight per item, redeem amount
//! 4. Review & Mint - Confirm and send the create-pack transaction
//!
//! # Design Principles
//!
//! - **Single owner**: [`PackCreateSession`] owns all wizard state
//! - **Immutable updates**: state changes are [`PackStatePatch`] merges
//! - **Forward only**: steps advance one at a time once valid
//! - **No stale writes**: metadata lookups are tagged with a generation
//! - **Collaborators behind traits**: wallet, builder, resolver, navigation

mod types;
mod steps;
mod store;
mod filters;
mod selection;
mod metadata;
mod submit;
mod services;
mod events;
mod view;
mod session;
pub mod dry_run;

pub use types::*;
pub use steps::*;
pub use store::*;
pub use filters::*;
pub use selection::*;
pub use metadata::*;
pub use submit::*;
pub use services::*;
pub use events::*;
pub use view::*;
pub use session::*;
