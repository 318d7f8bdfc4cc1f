//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Database, UserRepository, UserStore, VocabRepository, VocabStore};
use crate::services::{
    AuthService, Authenticator, IdentityResolver, IdentityService, VocabManager, VocabService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Identity resolution service
    pub identity_service: Arc<dyn IdentityService>,
    /// Vocabulary service
    pub vocab_service: Arc<dyn VocabService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state wired to the database-backed repositories.
    pub fn from_config(database: Arc<Database>) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));
        let words: Arc<dyn VocabRepository> = Arc::new(VocabStore::new(database.get_connection()));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone())),
            identity_service: Arc::new(IdentityResolver::new(users)),
            vocab_service: Arc::new(VocabManager::new(words)),
            database,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        identity_service: Arc<dyn IdentityService>,
        vocab_service: Arc<dyn VocabService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            identity_service,
            vocab_service,
            database,
        }
    }
}
