//! Turns observations and their derived metrics into display text.
//!
//! No metric is computed here; everything comes from [`DerivedMetrics`].
//! Temperatures are always shown in °F.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Write as _;

use crate::{
    metrics::{DerivedMetrics, celsius_to_fahrenheit},
    model::Observation,
};

pub const NO_DATA_MESSAGE: &str = "Unable to load weather data";
pub const NO_RIDING_DATA_MESSAGE: &str = "Unable to calculate riding conditions";

/// A titled value with a short description underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub value: String,
    pub description: String,
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            description: description.into(),
        }
    }
}

/// The full dashboard, in display order.
pub fn dashboard_cards(obs: &Observation, metrics: &DerivedMetrics) -> Vec<Card> {
    dashboard_cards_in(obs, metrics, &Local)
}

pub fn dashboard_cards_in<Tz>(obs: &Observation, metrics: &DerivedMetrics, tz: &Tz) -> Vec<Card>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let (time, date) = match DateTime::from_timestamp(obs.timestamp, 0) {
        Some(utc) => {
            let local = utc.with_timezone(tz);
            (
                local.format("%-I:%M:%S %p").to_string(),
                local.format("%-m/%-d/%Y").to_string(),
            )
        }
        None => ("--".to_string(), "Unknown date".to_string()),
    };

    vec![
        Card::new("Temperature", fahrenheit(metrics.air_temperature_f), "Current air temperature"),
        Card::new("Feels Like", fahrenheit(metrics.feels_like_f), "Perceived temperature"),
        Card::new("Wet Bulb Temperature", fahrenheit(metrics.wet_bulb_f), "Heat stress indicator"),
        Card::new("Dew Point", fahrenheit(metrics.dew_point_f), "Moisture in the air"),
        Card::new("Humidity", format!("{:.0}%", obs.relative_humidity), "Relative humidity"),
        Card::new("Barometric Pressure", format!("{:.2}", obs.station_pressure), "inHg"),
        Card::new("Wind Speed", format!("{:.1}", obs.wind_avg), "mph average"),
        Card::new("Wind Gust", format!("{:.1}", obs.wind_gust), "mph maximum"),
        Card::new(
            "Wind Direction",
            metrics.wind_direction.as_str(),
            format!("{}° from north", obs.wind_direction),
        ),
        Card::new("UV Index", format!("{:.0}", obs.uv), metrics.uv_category.label()),
        Card::new("Solar Radiation", obs.solar_radiation.to_string(), "W/m²"),
        Card::new("Precipitation", metrics.precipitation.label(), "Current conditions"),
        Card::new("Last Update", time, date),
    ]
}

/// Headline readings: temperature, humidity and wind.
pub fn summary_items(obs: &Observation) -> Vec<Card> {
    vec![
        Card::new("Temperature", fahrenheit(celsius_to_fahrenheit(obs.air_temperature)), ""),
        Card::new("Humidity", format!("{:.0}%", obs.relative_humidity), ""),
        Card::new("Wind Speed", format!("{:.1} mph", obs.wind_avg), ""),
        Card::new("Wind Gust", format!("{:.1} mph", obs.wind_gust), ""),
    ]
}

/// Secondary readings shown next to the summary.
pub fn weather_cards(obs: &Observation, metrics: &DerivedMetrics) -> Vec<Card> {
    vec![
        Card::new(
            "Barometric Pressure",
            format!("{:.2} inHg", obs.station_pressure),
            "Current atmospheric pressure",
        ),
        Card::new(
            "UV Index",
            format!("{:.0}", obs.uv),
            format!("{} exposure level", metrics.uv_category.label()),
        ),
        Card::new("Dew Point", fahrenheit(metrics.dew_point_f), "Moisture saturation point"),
    ]
}

pub fn riding_indicator(metrics: &DerivedMetrics) -> Card {
    let riding = &metrics.riding;
    Card::new(
        riding.message,
        format!("Wet Bulb Temperature: {}", fahrenheit(metrics.wet_bulb_f)),
        riding.description,
    )
}

/// Render cards as an aligned plain-text block.
pub fn render_cards(cards: &[Card]) -> String {
    let width = cards.iter().map(|c| c.title.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for card in cards {
        let _ = write!(out, "{:<width$}  {}", card.title, card.value, width = width);
        if !card.description.is_empty() {
            let _ = write!(out, "  ({})", card.description);
        }
        out.push('\n');
    }
    out
}

fn fahrenheit(value: f64) -> String {
    format!("{value:.1}°F")
}
