//! Derived weather metrics.
//!
//! Everything here is a pure function over plain numbers: no I/O, no shared
//! state. Out-of-range inputs (humidity outside 0..=100, NaN) are not guarded
//! and simply flow through the formulas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Observation;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Unit of a temperature passed into (and returned from) [`dew_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

/// Wet-bulb temperature in °F using the Stull (2011) approximation.
///
/// `humidity_pct` is relative humidity as a 0–100 number.
pub fn wet_bulb_temperature(temp_f: f64, humidity_pct: f64) -> f64 {
    let t = fahrenheit_to_celsius(temp_f);
    let rh = humidity_pct;

    let wet_bulb_c = t * (0.151977 * (rh + 8.313659).sqrt()).atan() + (t + rh).atan()
        - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035;

    celsius_to_fahrenheit(wet_bulb_c)
}

/// Linear dew point approximation: `T - (100 - RH) / 5` in Celsius.
///
/// The result is in the same unit as `temperature`.
pub fn dew_point(temperature: f64, humidity_pct: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => dew_point_c(temperature, humidity_pct),
        TemperatureUnit::Fahrenheit => {
            celsius_to_fahrenheit(dew_point_c(fahrenheit_to_celsius(temperature), humidity_pct))
        }
    }
}

fn dew_point_c(temp_c: f64, humidity_pct: f64) -> f64 {
    temp_c - (100.0 - humidity_pct) / 5.0
}

/// One of the 16 points of the compass, clockwise from north.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    const ALL: &[CompassPoint] = &[
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Width of one compass sector in degrees.
    pub const SECTOR: f64 = 22.5;

    pub const fn all() -> &'static [CompassPoint] {
        Self::ALL
    }

    /// Nearest compass point for a bearing in degrees.
    ///
    /// Bearings outside `[0, 360)` wrap around; ties round up (11.25° is NNE).
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let index = (normalized / Self::SECTOR + 0.5).floor() as usize % Self::ALL.len();
        Self::ALL[index]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn wind_direction_label(degrees: f64) -> CompassPoint {
    CompassPoint::from_degrees(degrees)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvCategory {
    /// Negative readings land in `Low`.
    pub fn from_index(uv: f64) -> Self {
        if uv < 3.0 {
            UvCategory::Low
        } else if uv < 6.0 {
            UvCategory::Moderate
        } else if uv < 8.0 {
            UvCategory::High
        } else if uv < 11.0 {
            UvCategory::VeryHigh
        } else {
            UvCategory::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UvCategory::Low => "Low",
            UvCategory::Moderate => "Moderate",
            UvCategory::High => "High",
            UvCategory::VeryHigh => "Very High",
            UvCategory::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for UvCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn uv_category(uv: f64) -> UvCategory {
    UvCategory::from_index(uv)
}

/// Precipitation type as reported by the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecipitationType {
    None,
    Rain,
    Hail,
    RainAndHail,
    /// A code the station API emitted that we don't know about.
    Unknown(i64),
}

impl PrecipitationType {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => PrecipitationType::None,
            1 => PrecipitationType::Rain,
            2 => PrecipitationType::Hail,
            3 => PrecipitationType::RainAndHail,
            other => PrecipitationType::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrecipitationType::None => "None",
            PrecipitationType::Rain => "Rain",
            PrecipitationType::Hail => "Hail",
            PrecipitationType::RainAndHail => "Rain + Hail",
            PrecipitationType::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for PrecipitationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn precipitation_label(code: i64) -> &'static str {
    PrecipitationType::from_code(code).label()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RidingTier {
    Safe,
    Caution,
    Danger,
}

impl RidingTier {
    /// Short lowercase identifier, e.g. for styling the indicator.
    pub fn as_str(&self) -> &'static str {
        match self {
            RidingTier::Safe => "safe",
            RidingTier::Caution => "caution",
            RidingTier::Danger => "danger",
        }
    }
}

impl fmt::Display for RidingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RidingStatus {
    pub tier: RidingTier,
    pub message: &'static str,
    pub description: &'static str,
}

/// Classify riding safety from a wet-bulb temperature in °F.
pub fn riding_status(wet_bulb_f: f64) -> RidingStatus {
    if wet_bulb_f < 70.0 {
        RidingStatus {
            tier: RidingTier::Safe,
            message: "Safe to Ride",
            description: "Conditions are comfortable for riding.",
        }
    } else if wet_bulb_f < 80.0 {
        RidingStatus {
            tier: RidingTier::Caution,
            message: "Ride with Caution",
            description: "Conditions are warm. Stay hydrated and take breaks.",
        }
    } else {
        RidingStatus {
            tier: RidingTier::Danger,
            message: "Too Hot to Ride",
            description: "Dangerous heat conditions. Avoid strenuous outdoor activity.",
        }
    }
}

/// All derived values for a single observation, temperatures in °F.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub air_temperature_f: f64,
    pub feels_like_f: f64,
    pub wet_bulb_f: f64,
    pub dew_point_f: f64,
    pub wind_direction: CompassPoint,
    pub uv_category: UvCategory,
    pub precipitation: PrecipitationType,
    pub riding: RidingStatus,
}

impl DerivedMetrics {
    pub fn from_observation(obs: &Observation) -> Self {
        let air_temperature_f = celsius_to_fahrenheit(obs.air_temperature);
        let wet_bulb_f = wet_bulb_temperature(air_temperature_f, obs.relative_humidity);

        Self {
            air_temperature_f,
            feels_like_f: celsius_to_fahrenheit(obs.feels_like),
            wet_bulb_f,
            dew_point_f: celsius_to_fahrenheit(dew_point(
                obs.air_temperature,
                obs.relative_humidity,
                TemperatureUnit::Celsius,
            )),
            wind_direction: wind_direction_label(obs.wind_direction),
            uv_category: uv_category(obs.uv),
            precipitation: PrecipitationType::from_code(obs.precipitation_type),
            riding: riding_status(wet_bulb_f),
        }
    }
}
