pub mod listing_cache;
pub mod owner_directory;

pub use listing_cache::ListingCache;
pub use owner_directory::{DirectoryError, OwnerDirectory};
