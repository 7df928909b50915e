use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::{AccessDenied, AccessPolicy, Action, Principal};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewOwner, Owner, OwnerPatch};
use crate::database::repository::OwnerStore;
use crate::services::listing_cache::ListingCache;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Owner not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// A write failed inside the store; the cause is for logs only
    #[error("Internal error: {0}")]
    Internal(#[source] DatabaseError),

    /// A read failed inside the store
    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Business layer for owner records.
///
/// Owns the not-found contract, the pets-before-owner deletion order, the
/// transaction boundaries of multi-step writes and the listing cache.
pub struct OwnerDirectory {
    store: Arc<dyn OwnerStore>,
    cache: ListingCache,
    policy: Arc<dyn AccessPolicy>,
}

impl OwnerDirectory {
    pub fn new(store: Arc<dyn OwnerStore>, cache: ListingCache, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { store, cache, policy }
    }

    /// Every owner. Served from the listing cache when populated.
    pub async fn list_all(&self, principal: &Principal) -> Result<Arc<Vec<Owner>>, DirectoryError> {
        if let Err(denied) = self.policy.check(principal, Action::ListOwners) {
            warn!(
                "Owner listing denied for {}: {}",
                principal.subject.as_deref().unwrap_or("anonymous"),
                denied
            );
            return Err(denied.into());
        }

        let store = self.store.clone();
        let owners = self.cache.get_or_load(|| async move { store.find_all().await }).await?;
        Ok(owners)
    }

    /// Owners with exactly this last name; never cached
    pub async fn list_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DirectoryError> {
        Ok(self.store.find_by_last_name(last_name).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Owner, DirectoryError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::NotFound(id))
    }

    pub async fn create(&self, owner: NewOwner) -> Result<Owner, DirectoryError> {
        let created = self.store.insert_owner(owner).await.map_err(internal)?;
        self.cache.invalidate().await;

        info!("Created owner {}", created.id);
        Ok(created)
    }

    /// Overwrite first and last name of an existing owner in one transaction
    pub async fn update(&self, id: i64, patch: OwnerPatch) -> Result<(), DirectoryError> {
        let mut tx = self.store.begin().await.map_err(internal)?;

        let mut owner = tx
            .lock_owner(id)
            .await
            .map_err(internal)?
            .ok_or(DirectoryError::NotFound(id))?;
        patch.apply(&mut owner);

        tx.save_owner(&owner).await.map_err(internal)?;
        tx.commit().await.map_err(internal)?;
        self.cache.invalidate().await;

        info!("Updated owner {}", id);
        Ok(())
    }

    /// Delete an owner and all of its pets, pets first, in one transaction
    pub async fn delete(&self, id: i64) -> Result<(), DirectoryError> {
        let mut tx = self.store.begin().await.map_err(internal)?;

        if tx.lock_owner(id).await.map_err(internal)?.is_none() {
            return Err(DirectoryError::NotFound(id));
        }

        let pets = tx.delete_pets_by_owner(id).await.map_err(internal)?;
        tx.delete_owner(id).await.map_err(internal)?;
        tx.commit().await.map_err(internal)?;
        self.cache.invalidate().await;

        info!("Deleted owner {} with {} pet(s)", id, pets);
        Ok(())
    }

    /// Round trip to the store, for health reporting
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.ping().await
    }
}

fn internal(err: DatabaseError) -> DirectoryError {
    error!("Owner store write failed: {}", err);
    DirectoryError::Internal(err)
}
