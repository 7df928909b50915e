pub mod owner;
pub mod pet;

pub use owner::{NewOwner, Owner, OwnerPatch};
pub use pet::Pet;
