//! The credential store: user registration, credential lookup, and session
//! issuing, resolution and revocation on top of a [`Store`] backend.
//!
//! A session token is accepted only when its signature verifies AND the
//! token is still listed in its owner's stored sessions. Removing it from the
//! list (logout) is the revocation mechanism.

use std::sync::Arc;

use todo_core::credentials::{normalize_email, validate_email, validate_password};
use todo_core::error::CoreError;
use todo_core::session::SessionKind;
use todo_db::models::user::{CreateUser, Session, User};
use todo_db::Store;

use crate::auth::jwt::TokenIssuer;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn Store>,
    issuer: TokenIssuer,
}

fn unauthorized(reason: impl Into<String>) -> AppError {
    AppError::Core(CoreError::Unauthorized(reason.into()))
}

impl CredentialStore {
    pub fn new(store: Arc<dyn Store>, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Look up a user by email; the input is normalized first.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.store.find_user_by_email(&normalize_email(email)).await?)
    }

    /// Resolve a login attempt.
    ///
    /// An unknown email and a wrong password both yield
    /// [`CoreError::InvalidCredentials`].
    pub async fn find_by_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

        let plaintext = password.to_owned();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&plaintext, &hash))
            .await
            .map_err(|e| AppError::Failure(format!("Password verification task failed: {e}")))?;

        if !matches {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::Core(CoreError::InvalidCredentials));
        }
        Ok(user)
    }

    /// Resolve the user owning a live `auth` session for `token`.
    ///
    /// Every failure (bad token, revoked session, store error) collapses to
    /// [`CoreError::Unauthorized`]; the reason is for logs only.
    pub async fn find_by_session_token(&self, token: &str) -> AppResult<User> {
        let verified = self
            .issuer
            .verify(token)
            .map_err(|e| unauthorized(e.to_string()))?;

        let session = Session {
            kind: SessionKind::Auth,
            token: token.to_string(),
        };
        match self
            .store
            .find_user_by_session(verified.user_id, &session)
            .await
        {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(unauthorized("Session is not live")),
            Err(e) => {
                tracing::error!(error = %e, "Session lookup failed");
                Err(unauthorized("Session lookup failed"))
            }
        }
    }

    /// Register a new account.
    ///
    /// The password is hashed before anything is persisted; the store only
    /// ever sees the hash.
    pub async fn create(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        let plaintext = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plaintext))
            .await
            .map_err(|e| AppError::Failure(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::Failure(format!("Password hashing failed: {e}")))?;

        let user = self
            .store
            .insert_user(&CreateUser {
                email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Issue a token for `user` and append it to the stored session list.
    pub async fn add_session(&self, user: &User, kind: SessionKind) -> AppResult<String> {
        let token = self
            .issuer
            .issue(user.id, kind)
            .map_err(|e| AppError::Failure(e.to_string()))?;

        let session = Session {
            kind,
            token: token.clone(),
        };
        if !self.store.push_session(user.id, &session).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user.id.to_string(),
            }));
        }
        tracing::info!(user_id = %user.id, kind = %kind, "Session issued");
        Ok(token)
    }

    /// Revoke every stored session carrying `token`. Idempotent.
    pub async fn remove_session(&self, user: &User, token: &str) -> AppResult<()> {
        let existed = self.store.pull_session(user.id, token).await?;
        if existed {
            tracing::info!(user_id = %user.id, "Session revoked");
        } else {
            tracing::debug!(user_id = %user.id, "Revoking session of a missing user");
        }
        Ok(())
    }
}
