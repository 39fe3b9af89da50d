use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum FlashcardsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Task join error: {0}")]
    Join(String),
}

pub type Result<T> = std::result::Result<T, FlashcardsError>;

// ---------------------------------------------------------------------------
// FetchError: opaque error value carried by actions and stored in state
// ---------------------------------------------------------------------------

/// A failed fetch, as recorded in the store.
///
/// The reducer never inspects it; it is stored verbatim so the presentation
/// layer can surface `message` and decide whether to retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<FlashcardsError> for FetchError {
    fn from(err: FlashcardsError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&FlashcardsError> for FetchError {
    fn from(err: &FlashcardsError) -> Self {
        Self::new(err.to_string())
    }
}
