// handlers/owners/mod.rs - Owner directory handlers
//
// Thin HTTP layer over OwnerDirectory. Each handler extracts its inputs,
// makes one directory call and maps the outcome to a status code; error
// mapping lives in crate::error.

pub mod create;  // POST   /owner
pub mod delete;  // DELETE /owner/:id
pub mod get;     // GET    /owner/:id
pub mod list;    // GET    /owners
pub mod search;  // GET    /owner?lastName=X
pub mod update;  // PUT    /owner/:id

pub use create::owner_create;
pub use delete::owner_delete;
pub use get::owner_get;
pub use list::owners_list;
pub use search::owners_search;
pub use update::owner_update;
