//! Admin authentication: one configured credential, one session marker.
//!
//! The gate is independent of the web framework; the HTTP layer turns its
//! policy into a cookie.

pub mod errors;
pub mod gate;
pub mod password;

pub use errors::AuthError;
pub use gate::{AdminCredentials, SessionGate, SessionPolicy, SESSION_MARKER};
pub use password::{hash_password, hash_password_with};
