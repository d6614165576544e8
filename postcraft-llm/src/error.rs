//! LLM error types
//!
//! Re-exports postcraft-error and converts provider failures into it.

pub use postcraft_error::{Error, ErrorKind, ErrorStatus, Result};

use crate::provider::ProviderError;

impl ProviderError {
    /// The workspace error kind this failure belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Network(_) => ErrorKind::NetworkFailed,
            ProviderError::Api { status, .. } if *status >= 500 => ErrorKind::ProviderUnavailable,
            ProviderError::Api { .. } => ErrorKind::InferenceFailed,
            ProviderError::Parse(_) => ErrorKind::ParseFailed,
            ProviderError::RateLimited { .. } => ErrorKind::RateLimited,
            ProviderError::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            ProviderError::Other(_) => ErrorKind::InferenceFailed,
        }
    }
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        let mut error = Error::new(err.kind(), err.to_string()).with_operation("provider::complete");

        match &err {
            ProviderError::Api { status, .. } => {
                error = error.with_context("http_status", status.to_string());
            }
            ProviderError::RateLimited { retry_after: Some(secs) } => {
                error = error.with_context("retry_after", secs.to_string());
            }
            _ => {}
        }

        error.set_source(err)
    }
}
