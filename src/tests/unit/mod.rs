//! Unit tests spanning several wizard modules
//!
//! - `session_tests`: selection, step gating, submission and finish through
//!   [`crate::core::pack::PackCreateSession`]
