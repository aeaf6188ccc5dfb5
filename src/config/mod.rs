// ABOUTME: Configuration management for the macrolog server
// ABOUTME: Environment-only configuration, no config files

/// Environment-based server configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseConfig, ServerConfig};
