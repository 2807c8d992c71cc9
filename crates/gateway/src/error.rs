//! Backend call failures and their GraphQL error shape.

use async_graphql::ErrorExtensions;
use common::RpcCode;
use thiserror::Error;

/// A failed call to one of the backends.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached or the connection broke.
    #[error("{backend} service unreachable: {source}")]
    Transport {
        backend: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a failure status.
    #[error("{backend} service returned {code}: {message}")]
    Remote {
        backend: &'static str,
        code: RpcCode,
        message: String,
    },

    /// The backend answered successfully with a body we could not decode.
    #[error("{backend} service sent an undecodable response: {source}")]
    Decode {
        backend: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl BackendError {
    /// Name of the backend that failed (`account` or `collecting`).
    pub fn backend(&self) -> &'static str {
        match self {
            BackendError::Transport { backend, .. }
            | BackendError::Remote { backend, .. }
            | BackendError::Decode { backend, .. } => backend,
        }
    }

    pub fn code(&self) -> RpcCode {
        match self {
            BackendError::Transport { .. } => RpcCode::Unavailable,
            BackendError::Remote { code, .. } => *code,
            BackendError::Decode { .. } => RpcCode::Internal,
        }
    }
}

impl ErrorExtensions for BackendError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code().as_str().to_string());
            ext.set("backend", self.backend().to_string());
        })
    }
}
