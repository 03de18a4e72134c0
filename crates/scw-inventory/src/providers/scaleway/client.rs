//! Scaleway Instance API client implementation.
//!
//! API Documentation: <https://www.scaleway.com/en/developers/api/instance/>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::models::{Server as ScalewayServer, ServerListResponse, ServerResponse};
use crate::providers::traits::{Directory, ProviderError, Server};

/// Base URL for the Scaleway Instance API.
pub const API_BASE_URL: &str = "https://api.scaleway.com/instance/v1";

/// Zone used when none is configured.
pub const DEFAULT_ZONE: &str = "fr-par-1";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for server listings. Only the first page is read.
const PER_PAGE: &str = "100";

/// Scaleway Instance directory.
#[derive(Clone)]
pub struct Scaleway {
    /// HTTP client.
    client: Client,
    /// Secret key for authentication.
    secret_key: String,
    /// Organization ID, used to scope listings.
    organization_id: String,
    /// Zone (e.g., "fr-par-1", "nl-ams-1").
    zone: String,
    /// API base URL.
    base_url: String,
}

impl std::fmt::Debug for Scaleway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scaleway")
            .field("organization_id", &self.organization_id)
            .field("zone", &self.zone)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Scaleway {
    /// Create a new Scaleway directory against the public API.
    ///
    /// # Arguments
    /// * `secret_key` - Scaleway Secret Key
    /// * `organization_id` - Organization ID
    /// * `zone` - Zone (e.g., "fr-par-1")
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created.
    pub fn new(
        secret_key: impl Into<String>,
        organization_id: impl Into<String>,
        zone: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(secret_key, organization_id, zone, API_BASE_URL)
    }

    /// Create a new Scaleway directory against a custom API endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created.
    pub fn with_base_url(
        secret_key: impl Into<String>,
        organization_id: impl Into<String>,
        zone: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            secret_key: secret_key.into(),
            organization_id: organization_id.into(),
            zone: zone.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Make an authenticated GET request.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/zones/{}{path}", self.base_url, self.zone);
        debug!(url = %url, ?query, "GET request");

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Token", &self.secret_key)
            .query(query)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response, parsing JSON or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                ProviderError::Serialization(e)
            })
        } else if status == StatusCode::NOT_FOUND {
            Err(ProviderError::NotFound(text))
        } else {
            Err(ProviderError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    /// Convert Scaleway server to our Server type.
    fn to_server(server: &ScalewayServer) -> Server {
        Server {
            id: server.id.clone(),
            name: server.name.clone(),
            tags: server.tags.clone(),
            public_ip: server.public_ip.as_ref().map(|ip| ip.address.clone()),
            private_ip: server.private_ip.clone().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Directory for Scaleway {
    async fn list_servers(&self) -> Result<Vec<Server>, ProviderError> {
        let response: ServerListResponse = self
            .get(
                "/servers",
                &[
                    ("organization", self.organization_id.as_str()),
                    ("per_page", PER_PAGE),
                ],
            )
            .await?;

        debug!(count = response.servers.len(), "Listed servers");
        Ok(response.servers.iter().map(Self::to_server).collect())
    }

    async fn server_id_by_name(&self, name: &str) -> Result<String, ProviderError> {
        // The name filter is a substring match on the API side.
        let response: ServerListResponse = self
            .get(
                "/servers",
                &[
                    ("organization", self.organization_id.as_str()),
                    ("name", name),
                ],
            )
            .await?;

        let mut matches = response.servers.into_iter().filter(|s| s.name == name);
        match (matches.next(), matches.count()) {
            (None, _) => Err(ProviderError::NotFound(name.to_string())),
            (Some(server), 0) => {
                debug!(name = %name, server_id = %server.id, "Resolved server name");
                Ok(server.id)
            }
            (Some(_), rest) => Err(ProviderError::Ambiguous {
                name: name.to_string(),
                count: rest + 1,
            }),
        }
    }

    async fn get_server(&self, id: &str) -> Result<Server, ProviderError> {
        let response: ServerResponse = self.get(&format!("/servers/{id}"), &[]).await?;
        Ok(Self::to_server(&response.server))
    }
}

#[cfg(test)]
mod tests {
    use super::super::models::PublicIp;
    use super::*;

    fn scaleway_server(public_ip: Option<&str>, private_ip: Option<&str>) -> ScalewayServer {
        ScalewayServer {
            id: "5c1a7c3e".to_string(),
            name: "master1".to_string(),
            tags: vec!["k8s".to_string(), "master".to_string()],
            public_ip: public_ip.map(|address| PublicIp {
                address: address.to_string(),
            }),
            private_ip: private_ip.map(str::to_string),
        }
    }

    #[test]
    fn test_server_conversion() {
        let converted =
            Scaleway::to_server(&scaleway_server(Some("51.15.1.2"), Some("10.2.3.4")));
        assert_eq!(converted.id, "5c1a7c3e");
        assert_eq!(converted.name, "master1");
        assert_eq!(converted.tags, vec!["k8s", "master"]);
        assert_eq!(converted.public_ip, Some("51.15.1.2".to_string()));
        assert_eq!(converted.private_ip, "10.2.3.4");
    }

    #[test]
    fn test_full_payload_ignores_unused_fields() {
        let body = r#"{"server": {
            "id": "5c1a7c3e",
            "name": "worker2",
            "organization": "org-123",
            "state": "running",
            "commercial_type": "DEV1-S",
            "tags": ["k8s"],
            "public_ip": {"id": "ip-1", "address": "51.15.1.9", "dynamic": false},
            "private_ip": "10.2.3.9"
        }}"#;
        let response: ServerResponse = serde_json::from_str(body).unwrap();
        let converted = Scaleway::to_server(&response.server);

        assert_eq!(converted.name, "worker2");
        assert_eq!(converted.public_ip.as_deref(), Some("51.15.1.9"));
        assert_eq!(converted.private_ip, "10.2.3.9");
    }

    #[test]
    fn test_server_conversion_without_addresses() {
        let converted = Scaleway::to_server(&scaleway_server(None, None));
        assert_eq!(converted.public_ip, None);
        assert_eq!(converted.private_ip, "");
    }

    #[test]
    fn test_debug_hides_secret_key() {
        let scw = Scaleway::new("super-secret", "org-123", DEFAULT_ZONE).unwrap();
        let rendered = format!("{scw:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("org-123"));
    }
}
