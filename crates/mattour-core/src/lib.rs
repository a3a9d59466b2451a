//! Shared domain types, geographic helpers, and configuration for `mattour`.

pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use geo::distance_meters;
pub use types::{
    AttractionCandidate, CleanedRestaurantRecord, Coordinate, ReconciledRestaurant,
    RestaurantCandidate, Review,
};
