use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::database::manager::DatabaseError;
use crate::database::models::{NewOwner, Owner, Pet};
use crate::database::repository::{OwnerStore, StoreTransaction};

/// Steps of the store that can be made to fail once, to exercise rollback
/// paths without a real database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    FindAll,
    InsertOwner,
    SaveOwner,
    DeletePets,
    DeleteOwner,
    Commit,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    last_owner_id: i64,
    last_pet_id: i64,
    owners: BTreeMap<i64, Owner>,
    pets: BTreeMap<i64, Pet>,
}

/// In-process owner store.
///
/// A transaction holds the state lock until it ends and works on a private
/// copy, so writers are serialized and an abandoned transaction leaves
/// nothing behind.
#[derive(Clone, Default)]
pub struct MemoryOwnerStore {
    state: Arc<Mutex<MemoryState>>,
    faults: Arc<Mutex<HashSet<FailPoint>>>,
    find_all_calls: Arc<AtomicUsize>,
}

impl MemoryOwnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next use of `point` fail with a query error
    pub async fn fail_next(&self, point: FailPoint) {
        self.faults.lock().await.insert(point);
    }

    /// Number of times the full listing was read from this store
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// Register a pet for an existing owner
    pub async fn add_pet(&self, owner_id: i64, name: &str) -> Result<Pet, DatabaseError> {
        let mut state = self.state.lock().await;
        if !state.owners.contains_key(&owner_id) {
            return Err(DatabaseError::QueryError(format!(
                "pet references missing owner {}",
                owner_id
            )));
        }
        state.last_pet_id += 1;
        let pet = Pet {
            id: state.last_pet_id,
            name: name.to_string(),
            owner_id,
        };
        state.pets.insert(pet.id, pet.clone());
        Ok(pet)
    }

    pub async fn pets_of(&self, owner_id: i64) -> Vec<Pet> {
        let state = self.state.lock().await;
        state
            .pets
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect()
    }

    async fn check_fault(faults: &Mutex<HashSet<FailPoint>>, point: FailPoint) -> Result<(), DatabaseError> {
        if faults.lock().await.remove(&point) {
            return Err(DatabaseError::QueryError(format!("injected failure at {:?}", point)));
        }
        Ok(())
    }
}

#[async_trait]
impl OwnerStore for MemoryOwnerStore {
    async fn find_all(&self) -> Result<Vec<Owner>, DatabaseError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        Self::check_fault(&self.faults, FailPoint::FindAll).await?;
        let state = self.state.lock().await;
        Ok(state.owners.values().cloned().collect())
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DatabaseError> {
        let state = self.state.lock().await;
        Ok(state
            .owners
            .values()
            .filter(|o| o.last_name == last_name)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, DatabaseError> {
        let state = self.state.lock().await;
        Ok(state.owners.get(&id).cloned())
    }

    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner, DatabaseError> {
        Self::check_fault(&self.faults, FailPoint::InsertOwner).await?;
        let mut state = self.state.lock().await;
        state.last_owner_id += 1;
        let created = owner.with_id(state.last_owner_id);
        state.owners.insert(created.id, created.clone());
        Ok(created)
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DatabaseError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            working,
            faults: self.faults.clone(),
        }))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    faults: Arc<Mutex<HashSet<FailPoint>>>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn lock_owner(&mut self, id: i64) -> Result<Option<Owner>, DatabaseError> {
        Ok(self.working.owners.get(&id).cloned())
    }

    async fn save_owner(&mut self, owner: &Owner) -> Result<(), DatabaseError> {
        MemoryOwnerStore::check_fault(&self.faults, FailPoint::SaveOwner).await?;
        match self.working.owners.get_mut(&owner.id) {
            Some(stored) => {
                *stored = owner.clone();
                Ok(())
            }
            None => Err(DatabaseError::QueryError(format!("owner {} vanished", owner.id))),
        }
    }

    async fn delete_pets_by_owner(&mut self, owner_id: i64) -> Result<u64, DatabaseError> {
        MemoryOwnerStore::check_fault(&self.faults, FailPoint::DeletePets).await?;
        let before = self.working.pets.len();
        self.working.pets.retain(|_, p| p.owner_id != owner_id);
        Ok((before - self.working.pets.len()) as u64)
    }

    async fn delete_owner(&mut self, id: i64) -> Result<(), DatabaseError> {
        MemoryOwnerStore::check_fault(&self.faults, FailPoint::DeleteOwner).await?;
        if self.working.pets.values().any(|p| p.owner_id == id) {
            return Err(DatabaseError::QueryError(format!(
                "owner {} is still referenced by pets",
                id
            )));
        }
        match self.working.owners.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DatabaseError::QueryError(format!("owner {} vanished", id))),
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        MemoryOwnerStore::check_fault(&self.faults, FailPoint::Commit).await?;
        let MemoryTransaction { mut guard, working, .. } = *self;
        *guard = working;
        Ok(())
    }
}
