//! Inventory error type.

use thiserror::Error;

use crate::providers::ProviderError;

/// Errors that abort an inventory run.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Missing or invalid configuration.
    #[error("{0}")]
    Config(String),

    /// Requested host name does not satisfy the allowed name pattern.
    #[error("invalid server name '{0}'")]
    InvalidName(String),

    /// Name does not resolve to exactly one server.
    #[error("failed to resolve server: {0}")]
    NotFound(String),

    /// Transport, authentication or API failure talking to the directory.
    #[error("directory unavailable")]
    DirectoryUnavailable(#[source] ProviderError),

    /// The gateway host has no public address to relay SSH through.
    #[error("gateway '{0}' has no public address")]
    GatewayUnreachable(String),

    /// Output encoding failed.
    #[error("failed to encode inventory")]
    Serialization(#[from] serde_json::Error),
}

impl From<ProviderError> for InventoryError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(_) | ProviderError::Ambiguous { .. } => {
                Self::NotFound(err.to_string())
            }
            other => Self::DirectoryUnavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_mapping() {
        let err: InventoryError = ProviderError::NotFound("proxy0".to_string()).into();
        assert!(matches!(err, InventoryError::NotFound(_)));

        let err: InventoryError = ProviderError::Ambiguous {
            name: "worker1".to_string(),
            count: 2,
        }
        .into();
        assert!(matches!(err, InventoryError::NotFound(ref m) if m.contains("ambiguous")));

        let err: InventoryError = ProviderError::Api {
            status: 401,
            message: "denied".to_string(),
        }
        .into();
        assert!(matches!(err, InventoryError::DirectoryUnavailable(_)));
        assert_eq!(err.to_string(), "directory unavailable");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("API error: 401 - denied".to_string())
        );
    }
}
