use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::{NewOwner, Owner};
use crate::database::repository::{OwnerStore, StoreTransaction};

const OWNER_COLUMNS: &str = "id, first_name, last_name, address, city, telephone";

/// Owner store backed by the `owners` and `pets` tables
pub struct PgOwnerStore {
    pool: PgPool,
}

impl PgOwnerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerStore for PgOwnerStore {
    async fn find_all(&self) -> Result<Vec<Owner>, DatabaseError> {
        let owners = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {} FROM owners ORDER BY id",
            OWNER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DatabaseError> {
        let owners = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {} FROM owners WHERE last_name = $1 ORDER BY id",
            OWNER_COLUMNS
        ))
        .bind(last_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, DatabaseError> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {} FROM owners WHERE id = $1",
            OWNER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner, DatabaseError> {
        let created = sqlx::query_as::<_, Owner>(&format!(
            "INSERT INTO owners (first_name, last_name, address, city, telephone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            OWNER_COLUMNS
        ))
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.address)
        .bind(&owner.city)
        .bind(&owner.telephone)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DatabaseError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStoreTransaction { tx }))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Wraps a sqlx transaction; sqlx rolls back on drop if not committed
pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn lock_owner(&mut self, id: i64) -> Result<Option<Owner>, DatabaseError> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {} FROM owners WHERE id = $1 FOR UPDATE",
            OWNER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(owner)
    }

    async fn save_owner(&mut self, owner: &Owner) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE owners
             SET first_name = $2, last_name = $3, address = $4, city = $5, telephone = $6
             WHERE id = $1",
        )
        .bind(owner.id)
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.address)
        .bind(&owner.city)
        .bind(&owner.telephone)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() != 1 {
            return Err(DatabaseError::QueryError(format!(
                "update of owner {} affected {} rows",
                owner.id,
                result.rows_affected()
            )));
        }
        Ok(())
    }

    async fn delete_pets_by_owner(&mut self, owner_id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM pets WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_owner(&mut self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() != 1 {
            return Err(DatabaseError::QueryError(format!(
                "delete of owner {} affected {} rows",
                id,
                result.rows_affected()
            )));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }
}
