//! Shared domain types and configuration for trendlens.
//!
//! Every other crate in the workspace speaks in terms of [`ContentRecord`]:
//! the normalizer produces them and the trend analysis consumes them.

pub mod app_config;
pub mod config;
pub mod content;
pub mod taxonomy;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{
    AudienceEstimate, BrandOpportunities, ContentDetails, ContentMetrics, ContentRecord,
    ContentType, CreatorCategory, CreatorInfo, EngagementQuality, GeographicInfo, GrowthPhase,
    Platform, TrendIndicators,
};
pub use taxonomy::{load_taxonomy, parse_taxonomy, Taxonomy, TrendTopic};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read taxonomy file {path}: {source}")]
    TaxonomyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy file: {0}")]
    TaxonomyFileParse(#[from] serde_yaml::Error),

    #[error("taxonomy validation failed: {0}")]
    Validation(String),
}
