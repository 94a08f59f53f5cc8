//! Crate-level tests
//!
//! - `common`: fixtures for items, states and wired-up sessions
//! - `mocks`: recording collaborators for assertions on side effects
//! - `unit`: session behaviour across modules
//! - `property`: invariants checked with proptest

mod mocks;
mod property;
mod unit;
