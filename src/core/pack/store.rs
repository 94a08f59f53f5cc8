//! Wizard State Store
//!
//! Owns the session's [`PackState`]. Every change goes through [`PackStore::merge`]
//! or [`PackStore::reset`]; the revision counter lets readers skip recomputation
//! when nothing changed.

use super::types::{PackState, PackStatePatch};

#[derive(Debug, Clone, Default)]
pub struct PackStore {
    state: PackState,
    revision: u64,
}

impl PackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PackState {
        &self.state
    }

    /// Incremented on every effective change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Shallow-overwrite the fields named in `patch`. No validation is done here.
    ///
    /// Returns `true` if the state changed.
    pub fn merge(&mut self, patch: PackStatePatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let next = self.state.merged(patch);
        if next == self.state {
            return false;
        }
        self.state = next;
        self.revision += 1;
        true
    }

    pub fn reset(&mut self) {
        self.state = PackState::default();
        self.revision += 1;
    }
}
