use thiserror::Error;

/// Failures talking to the hosted auth-and-database backend.
///
/// A missing identity is never an error (anonymous callers are a normal
/// branch); everything here is a genuine failure that callers must handle.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status outside the
    /// "no session" cases the client absorbs.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A single-row lookup matched no row.
    #[error("no matching row in {table}")]
    RowNotFound { table: &'static str },

    #[error("unexpected backend payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RowNotFound { .. })
    }
}
