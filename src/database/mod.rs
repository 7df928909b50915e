pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{FailPoint, MemoryOwnerStore};
pub use postgres::PgOwnerStore;
pub use repository::{OwnerStore, StoreTransaction};
