//! Voucher Metadata Resolution
//!
//! Looks up the selected voucher's metadata in the background and hands the
//! result back as a [`PackStatePatch`] when the session polls.
//!
//! Every request bumps a generation counter. Results carrying an older
//! generation are dropped, so a slow lookup for a previous voucher never
//! overwrites the current one. Resolved metadata is cached per identifier.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::services::{MetadataResolver, ServiceError};
use super::types::{ItemId, PackStatePatch, ResolvedMetadata};

struct Resolution {
    generation: u64,
    id: ItemId,
    result: Result<Option<ResolvedMetadata>, ServiceError>,
}

pub struct MetadataRequests {
    generation: u64,
    cache: HashMap<ItemId, ResolvedMetadata>,
    /// Cached hit waiting for the next drain
    ready: Option<PackStatePatch>,
    tx: mpsc::UnboundedSender<Resolution>,
    rx: mpsc::UnboundedReceiver<Resolution>,
}

impl Default for MetadataRequests {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataRequests {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            generation: 0,
            cache: HashMap::new(),
            ready: None,
            tx,
            rx,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start resolving `id`, superseding any request still in flight.
    ///
    /// Outside a tokio runtime uncached metadata stays unresolved.
    pub fn request(&mut self, resolver: Arc<dyn MetadataResolver>, id: ItemId) {
        self.generation += 1;

        if let Some(data) = self.cache.get(&id) {
            log::debug!("Voucher metadata for {id} served from cache");
            self.ready = Some(PackStatePatch::from(data.clone()));
            return;
        }
        self.ready = None;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("No async runtime, voucher metadata for {id} stays unresolved");
            return;
        };

        let generation = self.generation;
        let tx = self.tx.clone();
        runtime.spawn(async move {
            let result = resolver.resolve(&id).await;
            // Receiver gone means the session was dropped
            let _ = tx.send(Resolution {
                generation,
                id,
                result,
            });
        });
    }

    /// Invalidate any request in flight.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.ready = None;
    }

    /// Collect finished lookups. Returns a patch for the current request only.
    pub fn drain(&mut self) -> Option<PackStatePatch> {
        let mut patch = self.ready.take();

        while let Ok(resolution) = self.rx.try_recv() {
            let Resolution {
                generation,
                id,
                result,
            } = resolution;

            match result {
                Ok(Some(data)) => {
                    self.cache.insert(id.clone(), data.clone());
                    if generation == self.generation {
                        patch = Some(PackStatePatch::from(data));
                    } else {
                        log::debug!(
                            "Discarding stale metadata for {id} (generation {generation}, current {})",
                            self.generation
                        );
                    }
                }
                Ok(None) => {
                    log::debug!("Metadata for {id} not resolved");
                }
                Err(e) => {
                    log::warn!("Failed to resolve metadata for {id}: {e}");
                }
            }
        }

        patch
    }
}
