//! Scaleway Instance API response models.

use serde::Deserialize;

/// Instance server.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Server ID.
    pub id: String,
    /// Server name.
    pub name: String,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attached public IP.
    #[serde(default)]
    pub public_ip: Option<PublicIp>,
    /// Private IP on the zone network.
    #[serde(default)]
    pub private_ip: Option<String>,
}

/// Public IP attached to a server.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicIp {
    /// IP address.
    pub address: String,
}

/// Server list response.
#[derive(Debug, Deserialize)]
pub struct ServerListResponse {
    /// List of servers.
    pub servers: Vec<Server>,
}

/// Single server response.
#[derive(Debug, Deserialize)]
pub struct ServerResponse {
    /// Server details.
    pub server: Server,
}
