//! Typed errors for catalog loading and configuration

use thiserror::Error;

/// Errors raised while loading the endpoint catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A collection file is not valid YAML or does not match the schema
    #[error("Invalid collection {source_name}: {error}")]
    Parse {
        source_name: String,
        #[source]
        error: serde_yaml::Error,
    },

    /// Two descriptors share a slug
    #[error("Duplicate endpoint slug: {0}")]
    DuplicateSlug(String),

    /// The catalog ended up with no descriptors at all
    #[error("Catalog contains no endpoints")]
    Empty,

    #[error("Failed to read collections: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}
