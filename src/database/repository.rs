use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewOwner, Owner};

/// Persistence boundary for owner and pet records.
///
/// Plain reads and inserts go straight through; multi-step writes go through
/// a [`StoreTransaction`] obtained from [`OwnerStore::begin`].
#[async_trait]
pub trait OwnerStore: Send + Sync {
    /// All owners, in store-defined order
    async fn find_all(&self) -> Result<Vec<Owner>, DatabaseError>;

    /// Owners whose last name equals `last_name` exactly
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, DatabaseError>;

    /// Persist a new owner and return it with its assigned id
    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner, DatabaseError>;

    /// Open an atomic unit of work
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DatabaseError>;

    /// Cheap round trip used by the health endpoint
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// A single atomic unit of work.
///
/// Nothing is visible to other callers until [`commit`](Self::commit)
/// succeeds. Dropping the transaction without committing rolls it back.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Load an owner and hold it against concurrent writers until the
    /// transaction ends
    async fn lock_owner(&mut self, id: i64) -> Result<Option<Owner>, DatabaseError>;

    async fn save_owner(&mut self, owner: &Owner) -> Result<(), DatabaseError>;

    /// Remove every pet referencing `owner_id`; returns how many went
    async fn delete_pets_by_owner(&mut self, owner_id: i64) -> Result<u64, DatabaseError>;

    async fn delete_owner(&mut self, id: i64) -> Result<(), DatabaseError>;

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError>;
}
