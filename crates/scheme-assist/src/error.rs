use std::path::PathBuf;

use scheme_common::error::CommonError;
use scheme_common::openai::OpenAiClientError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("provider client error: {0}")]
    Provider(#[from] OpenAiClientError),
}

/// Failure of a remote text-generation call.
///
/// Never surfaced to end users; the composer maps every variant to its deterministic
/// fallback text.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no text-generation provider is configured")]
    NotConfigured,

    #[error("provider request timed out")]
    Timeout,

    #[error("provider call failed: {0}")]
    Provider(OpenAiClientError),

    #[error("provider returned an empty completion")]
    EmptyResponse,

    #[error("provider output could not be used: {0}")]
    Malformed(String),
}

impl From<OpenAiClientError> for GenerationError {
    fn from(err: OpenAiClientError) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Provider(err)
        }
    }
}
