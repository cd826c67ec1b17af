// src/models/mod.rs

//! Domain models for the portal client.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod credentials;
mod station;
pub mod wire;

// Re-export all public types
pub use config::{Config, EndpointConfig, PathsConfig, PortalConfig, RankingConfig};
pub use credentials::Credentials;
pub use station::{Catalog, EnrichedStationRecord, RecordSource, StationRecord};
