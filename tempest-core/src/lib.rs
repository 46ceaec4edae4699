//! Core library for the `tempest` CLI.
//!
//! This crate defines:
//! - Station observation models
//! - Derived weather metrics (wet bulb, dew point, UV, wind, riding safety)
//! - Observation providers and the store holding the last fetch
//! - Configuration & credentials handling
//! - Text formatting of readings and a periodic refresh loop
//!
//! It is used by `tempest-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod format;
pub mod metrics;
pub mod model;
pub mod provider;
pub mod refresh;
pub mod store;

pub use config::{Config, StationConfig};
pub use metrics::{
    CompassPoint, DerivedMetrics, PrecipitationType, RidingStatus, RidingTier, TemperatureUnit,
    UvCategory, dew_point, precipitation_label, riding_status, uv_category, wet_bulb_temperature,
    wind_direction_label,
};
pub use model::{Observation, ObservationError, StationObservations};
pub use provider::{ObservationProvider, ProviderId};
pub use refresh::Refresher;
pub use store::{ObservationStore, Snapshot};
