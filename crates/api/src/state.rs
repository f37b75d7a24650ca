use std::sync::Arc;

use todo_db::Store;

use crate::auth::credentials::CredentialStore;
use crate::auth::jwt::TokenIssuer;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration, read-only after startup.
    pub config: Arc<ServerConfig>,
    /// Registration, login and session resolution.
    pub credentials: CredentialStore,
}

impl AppState {
    /// Wire up state; the token issuer takes its secret from `config` here,
    /// once.
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let issuer = TokenIssuer::new(&config.jwt);
        let credentials = CredentialStore::new(Arc::clone(&store), issuer);
        Self {
            store,
            config: Arc::new(config),
            credentials,
        }
    }
}
