//! Pure domain logic shared by the store and the HTTP layer.
//!
//! Nothing in this crate performs I/O.

pub mod credentials;
pub mod error;
pub mod session;
pub mod todo;
pub mod types;
