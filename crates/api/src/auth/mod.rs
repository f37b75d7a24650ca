//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed session-token issuing and verification.
//! - [`credentials`] -- the credential store: registration, login lookup,
//!   session issuing/revocation and token-to-user resolution.

pub mod credentials;
pub mod jwt;
pub mod password;
