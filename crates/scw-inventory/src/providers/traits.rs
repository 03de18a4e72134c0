//! Directory trait and common types for server listing providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to a server directory.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Server not found.
    #[error("Server not found: {0}")]
    NotFound(String),

    /// More than one server carries the requested name.
    #[error("Server name '{name}' is ambiguous ({count} servers match)")]
    Ambiguous { name: String, count: usize },

    /// Response body could not be decoded.
    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),
}

/// A server as seen by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Unique server identifier.
    pub id: String,
    /// Server name.
    pub name: String,
    /// Tags in provider order.
    pub tags: Vec<String>,
    /// Public IPv4 address, if one is attached.
    pub public_ip: Option<String>,
    /// Private address (empty when the provider reports none).
    pub private_ip: String,
}

impl Server {
    /// Address Ansible should connect to: public when present, private otherwise.
    #[must_use]
    pub fn reachable_address(&self) -> &str {
        match self.public_ip.as_deref() {
            Some(ip) if !ip.is_empty() => ip,
            _ => &self.private_ip,
        }
    }
}

/// Read-only view of a provider's server directory.
#[async_trait]
pub trait Directory: Send + Sync {
    /// List all servers.
    async fn list_servers(&self) -> Result<Vec<Server>, ProviderError>;

    /// Resolve a server name to its ID.
    async fn server_id_by_name(&self, name: &str) -> Result<String, ProviderError>;

    /// Get server by ID.
    async fn get_server(&self, id: &str) -> Result<Server, ProviderError>;

    /// Resolve a server by name, then fetch it by ID.
    async fn find_server_by_name(&self, name: &str) -> Result<Server, ProviderError> {
        let id = self.server_id_by_name(name).await?;
        self.get_server(&id).await
    }
}
