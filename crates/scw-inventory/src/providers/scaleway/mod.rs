//! Scaleway Instance directory.
//!
//! Implements the [`Directory`](crate::providers::Directory) trait on top of
//! the Scaleway Instance API. Only the read endpoints are used: listing
//! servers, filtering by name and fetching a server by ID.

mod client;
mod models;

pub use client::{Scaleway, API_BASE_URL, DEFAULT_ZONE};
pub use models::{
    PublicIp, Server as ScalewayServer, ServerListResponse, ServerResponse,
};
