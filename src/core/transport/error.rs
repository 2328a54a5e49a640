//! Listener errors.

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

/// Why a service stopped listening.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop ended with an error.
    #[error("Server on {address} stopped: {source}")]
    Serve {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn serve(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Serve {
            address: address.into(),
            source,
        }
    }
}
