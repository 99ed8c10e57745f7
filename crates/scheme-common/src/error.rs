/// Error types shared by the scheme assistant crates.
///
/// These cover infrastructure that is optional at runtime (Redis). Application-specific
/// errors live in the server crate and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("redis unavailable, degrading gracefully")]
    RedisUnavailable,
}
