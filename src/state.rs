use std::sync::Arc;

use crate::auth::{RolePolicy, TokenVerifier};
use crate::config::AppConfig;
use crate::database::repository::OwnerStore;
use crate::services::{ListingCache, OwnerDirectory};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<OwnerDirectory>,
    pub tokens: TokenVerifier,
    /// Prefix the owner routes are mounted under, used to build Location headers
    pub path_prefix: String,
}

impl AppState {
    /// Wire the directory, cache and access policy from configuration
    pub fn new(config: &AppConfig, store: Arc<dyn OwnerStore>) -> Self {
        let directory = OwnerDirectory::new(
            store,
            ListingCache::new(config.cache.enable_listing_cache),
            Arc::new(RolePolicy::new(config.security.listing_roles.clone())),
        );

        Self {
            directory: Arc::new(directory),
            tokens: TokenVerifier::new(&config.security.jwt_secret),
            path_prefix: config.api.path_prefix.clone(),
        }
    }
}
