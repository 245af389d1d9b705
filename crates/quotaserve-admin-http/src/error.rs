//! Admin API error type and its HTTP status mapping.

use crate::dispatch::StoreError;

/// Errors surfaced to admin API callers.
///
/// Decode failures short-circuit before the store is touched; store
/// operation failures are propagated rather than silently swallowed, and
/// map to a generic server error. Addressing a namespace that does not
/// exist on a read is reported as not-found.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The request body could not be decoded.
    #[error("malformed request body: {0}")]
    BadContent(String),

    /// A read addressed a namespace absent from the store.
    #[error("unknown namespace: {0}")]
    NamespaceNotFound(String),

    /// The console was asked for a page with no matching template.
    #[error("no such page: {0}")]
    PageNotFound(String),

    /// A console template failed to load or render.
    #[error("console rendering failed: {0}")]
    Render(String),

    /// A store mutation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A response body could not be serialized.
    #[error("failed to encode response: {0}")]
    Encode(String),
}

impl AdminError {
    /// The HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::NamespaceNotFound(_) | Self::PageNotFound(_) | Self::Render(_) => {
                http::StatusCode::NOT_FOUND
            }
            Self::BadContent(_) | Self::Store(_) | Self::Encode(_) => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
