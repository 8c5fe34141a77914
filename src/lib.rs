pub mod auth;
pub mod client;
pub mod config;
pub mod harvest;
pub mod model;
pub mod persist;
pub mod traits;

// Re-export common types for convenience
pub use auth::{AccessToken, AuthError};
pub use client::CatalogClient;
pub use config::{ConfigError, Credentials, HarvestConfig, HarvestSettings};
pub use model::*;
pub use persist::{save_genres, OutputTargets, PersistError};
pub use traits::*;
