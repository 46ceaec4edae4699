use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single station observation, in the units the Tempest REST API reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Unix seconds.
    pub timestamp: i64,
    /// °C
    pub air_temperature: f64,
    /// Percent, 0..=100.
    pub relative_humidity: f64,
    /// inHg
    pub station_pressure: f64,
    /// mph
    pub wind_avg: f64,
    /// mph
    pub wind_gust: f64,
    /// Degrees clockwise from north.
    pub wind_direction: f64,
    pub precipitation_type: i64,
    /// W/m²
    pub solar_radiation: f64,
    pub uv: f64,
    /// °C
    pub feels_like: f64,
}

impl Observation {
    /// Fixed sample reading, used when the station can't be reached.
    pub fn demo(timestamp: i64) -> Self {
        Self {
            timestamp,
            air_temperature: 29.4,
            relative_humidity: 65.0,
            station_pressure: 29.92,
            wind_avg: 5.0,
            wind_gust: 8.0,
            wind_direction: 180.0,
            precipitation_type: 0,
            solar_radiation: 800.0,
            uv: 5.0,
            feels_like: 32.2,
        }
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Payload of the station observations endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationObservations {
    #[serde(default)]
    pub station_id: Option<i64>,

    /// The API sends `null` or omits this when the station has nothing to report.
    #[serde(default)]
    pub obs: Option<Vec<Observation>>,
}

impl StationObservations {
    pub fn from_observation(obs: Observation) -> Self {
        Self {
            station_id: None,
            obs: Some(vec![obs]),
        }
    }

    /// The current observation: the first entry of `obs`.
    pub fn latest(&self) -> Result<&Observation, ObservationError> {
        self.obs
            .as_deref()
            .and_then(|obs| obs.first())
            .ok_or(ObservationError::NoData)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ObservationError {
    #[error("station returned no observations")]
    NoData,
}
