//! Ansible dynamic inventory for Scaleway servers.
//!
//! Two modes are supported, matching the Ansible inventory script protocol:
//!
//! - `--list` groups servers by tag ([`grouper::list_inventory`]).
//! - `--host <name>` derives connection variables for one server
//!   ([`resolver::resolve_host`]): address selection, the SSH relay through
//!   the `proxy0` gateway and the VPN overlay address.
//!
//! # Example
//!
//! ```rust,ignore
//! use scw_inventory::{resolve_host, InventoryConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = InventoryConfig::from_env()?;
//!     let directory = config.directory()?;
//!
//!     let vars = resolve_host("worker1", &config.name_pattern, &directory).await?;
//!     println!("{}", scw_inventory::output::render(&vars)?);
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod grouper;
pub mod naming;
pub mod output;
pub mod providers;
pub mod resolver;

pub use config::InventoryConfig;
pub use error::InventoryError;
pub use grouper::{group_by_tag, list_inventory, Groups};
pub use naming::{NameClass, NamePattern};
pub use providers::scaleway::Scaleway;
pub use providers::{Directory, ProviderError, Server};
pub use resolver::{resolve_host, HostVars, GATEWAY_HOST};
