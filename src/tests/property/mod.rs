//! Property-based tests for the pack wizard
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `selection_props`: Selection handler invariants
//!   - Item count never exceeds the cap
//!   - A rejected insert leaves state unchanged
//!   - At most one voucher is ever selected
//!   - Distribution type always matches the supply flag
//!
//! - `step_props`: Step controller invariants
//!   - Never advances from an invalid step
//!   - Only moves forward, one step at a time
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod step_props;
