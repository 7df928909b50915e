use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::database::models::Owner;

#[derive(Default)]
struct Slot {
    /// Bumped by every eviction
    generation: u64,
    owners: Option<Arc<Vec<Owner>>>,
}

/// Single-entry cache for the "all owners" listing.
///
/// Filled lazily by the first read after an eviction, cleared wholesale by
/// every write. A load that was already in flight when an eviction happened
/// is returned to its caller but never stored.
pub struct ListingCache {
    enabled: bool,
    slot: RwLock<Slot>,
}

impl ListingCache {
    pub const KEY: &'static str = "allOwners";

    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            slot: RwLock::new(Slot::default()),
        }
    }

    /// Cached listing, or the result of `load` (stored if no eviction
    /// happened while it ran). Errors from `load` are returned and nothing
    /// is cached.
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<Vec<Owner>>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Owner>, E>>,
    {
        if !self.enabled {
            return load().await.map(Arc::new);
        }

        let generation = {
            let slot = self.slot.read().await;
            if let Some(owners) = &slot.owners {
                debug!(key = Self::KEY, "listing cache hit");
                return Ok(owners.clone());
            }
            slot.generation
        };

        debug!(key = Self::KEY, "listing cache miss");
        let owners = Arc::new(load().await?);

        let mut slot = self.slot.write().await;
        if slot.generation == generation && slot.owners.is_none() {
            slot.owners = Some(owners.clone());
        }
        Ok(owners)
    }

    /// Drop the cached listing, whatever it holds
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.generation = slot.generation.wrapping_add(1);
        slot.owners = None;
        debug!(key = Self::KEY, generation = slot.generation, "listing cache evicted");
    }

    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.owners.is_some()
    }
}
