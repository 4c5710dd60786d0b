use thiserror::Error;

/// Error type shared across plastgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A uniqueness or foreign-key constraint was violated. Fatal to the
    /// run; never retried.
    #[error("constraint violation: {0}")]
    Constraint(String),
    /// Database or session failure.
    #[error("database error: {0}")]
    Db(String),
    /// A request was rejected before any generation began.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by plastgen crates.
pub type Result<T> = std::result::Result<T, Error>;
