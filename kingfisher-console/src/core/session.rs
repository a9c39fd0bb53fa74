//! Session accessor
//!
//! Reads the bearer credential issued by the external auth provider.
//! The accessor is a pure read over the local store; a missing token is
//! a fatal precondition for any remote call (the view redirects to the
//! auth entry point, an open form aborts its submission).

use super::local_store::{LocalStore, StoreError};

/// Store key holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Clone)]
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Current bearer token, if the operator is signed in
    pub fn token(&self) -> Option<String> {
        self.store
            .get_string(AUTH_TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Drop the stored credential (logout)
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(AUTH_TOKEN_KEY)
    }
}
