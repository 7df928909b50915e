use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    /// Reference to the owning record; deletion is orchestrated by the
    /// directory, never cascaded by the store.
    pub owner_id: i64,
}
