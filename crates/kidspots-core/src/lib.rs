mod app_config;
mod config;
mod location;
mod location_type;
mod region;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{Location, NewLocation, Tags};
pub use location_type::{LocationType, LocationTypeConfig, LOCATION_TYPES};
pub use region::{BoundingBox, Region};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid location type: {0}")]
    InvalidLocationType(String),
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
