// hass-api: Async Rust client for the Home Assistant REST API.
//
// Authenticates with a long-lived access token and exposes one typed
// method per REST endpoint. No retries, no caching, no streaming -- just
// typed requests and structured errors.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod timestamp;
pub mod transport;

mod events;
mod services;
mod states;
mod system;

pub use auth::AccessToken;
pub use client::HomeAssistantClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
