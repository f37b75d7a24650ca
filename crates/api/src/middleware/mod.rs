//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- Resolves the user owning the live session token in `x-auth`.

pub mod auth;
