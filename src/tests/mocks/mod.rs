//! Mock implementations for testing
//!
//! Hand-written collaborators for the cases `mockall` mocks cannot express:
//! a transaction builder that borrows its request and a resolver with
//! per-identifier latency.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::pack::{
    CreatePackRequest, ItemId, MetadataResolver, PackState, ResolvedMetadata, ServiceError,
    TransactionBuilder,
};

// ============================================================================
// Transaction Builder
// ============================================================================

/// Records every pack it is asked to create
pub struct RecordingTransactionBuilder {
    calls: Mutex<Vec<PackState>>,
    fail_with: Option<ServiceError>,
}

impl RecordingTransactionBuilder {
    pub fn ok() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(err: ServiceError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(err),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<PackState> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TransactionBuilder for RecordingTransactionBuilder {
    async fn send_create_pack<'a>(&self, request: CreatePackRequest<'a>) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(request.data.clone());
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Metadata Resolver
// ============================================================================

/// Resolves `name = id` after a per-identifier delay
pub struct SlowMetadata {
    delays: HashMap<ItemId, Duration>,
}

impl SlowMetadata {
    pub fn instant() -> Self {
        Self {
            delays: HashMap::new(),
        }
    }

    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(ItemId::new(id), delay);
        self
    }
}

#[async_trait]
impl MetadataResolver for SlowMetadata {
    async fn resolve(&self, id: &ItemId) -> Result<Option<ResolvedMetadata>, ServiceError> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        Ok(Some(ResolvedMetadata {
            image: format!("https://arweave.net/{id}.png"),
            name: id.to_string(),
            description: format!("Voucher {id}"),
        }))
    }
}
