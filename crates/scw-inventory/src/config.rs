//! Environment configuration.

use crate::error::InventoryError;
use crate::naming::NamePattern;
use crate::providers::scaleway::{Scaleway, API_BASE_URL, DEFAULT_ZONE};

/// Organization credential.
pub const ENV_ORGANIZATION: &str = "SCALEWAY_ORGANIZATION";
/// API secret token.
pub const ENV_TOKEN: &str = "SCALEWAY_TOKEN";
/// Instance zone.
pub const ENV_ZONE: &str = "SCALEWAY_ZONE";
/// API endpoint override.
pub const ENV_API_URL: &str = "SCALEWAY_API_URL";
/// Allowed server name pattern override.
pub const ENV_NAME_PATTERN: &str = "SCALEWAY_INVENTORY_NAME_PATTERN";

/// Settings read once at startup.
#[derive(Clone)]
pub struct InventoryConfig {
    /// Organization ID.
    pub organization: String,
    /// Secret token.
    pub token: String,
    /// Zone to query.
    pub zone: String,
    /// API base URL.
    pub api_url: String,
    /// Allowed server names.
    pub name_pattern: NamePattern,
}

impl std::fmt::Debug for InventoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryConfig")
            .field("organization", &self.organization)
            .field("token", &"<redacted>")
            .field("zone", &self.zone)
            .field("api_url", &self.api_url)
            .field("name_pattern", &self.name_pattern.as_str())
            .finish()
    }
}

impl InventoryConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns `InventoryError::Config` if a credential is missing or blank,
    /// or the name pattern override does not compile.
    pub fn from_env() -> Result<Self, InventoryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// See [`InventoryConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InventoryError> {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            optional(key)
                .ok_or_else(|| InventoryError::Config(format!("required {key} env var is not set")))
        };

        let organization = required(ENV_ORGANIZATION)?;
        let token = required(ENV_TOKEN)?;
        let name_pattern = match optional(ENV_NAME_PATTERN) {
            Some(pattern) => NamePattern::new(&pattern)?,
            None => NamePattern::default(),
        };

        Ok(Self {
            organization,
            token,
            zone: optional(ENV_ZONE).unwrap_or_else(|| DEFAULT_ZONE.to_string()),
            api_url: optional(ENV_API_URL).unwrap_or_else(|| API_BASE_URL.to_string()),
            name_pattern,
        })
    }

    /// Build the Scaleway directory described by this configuration.
    ///
    /// # Errors
    /// Returns `InventoryError::DirectoryUnavailable` if the HTTP client
    /// cannot be created.
    pub fn directory(&self) -> Result<Scaleway, InventoryError> {
        Scaleway::with_base_url(&self.token, &self.organization, &self.zone, &self.api_url)
            .map_err(InventoryError::DirectoryUnavailable)
    }
}
