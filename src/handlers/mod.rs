// handlers/mod.rs - HTTP handlers
//
// owners: the owner directory routes, mounted under the configured prefix
// system: service index and health, mounted at the root

pub mod owners;
pub mod system;
