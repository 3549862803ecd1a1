use thiserror::Error;

/// Errors from credential handling. A wrong password is not an error: the
/// gate simply declines.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid password hash: {0}")]
    InvalidHash(String),
    #[error("hashing error: {0}")]
    Hashing(String),
}
