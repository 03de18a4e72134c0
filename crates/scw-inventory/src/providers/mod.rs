//! Server directory abstractions.

pub mod scaleway;
mod traits;

pub use traits::{Directory, ProviderError, Server};
