use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;

use crate::{config::StationConfig, model::StationObservations};

use super::ObservationProvider;

/// Reads observations from the WeatherFlow Tempest REST API.
#[derive(Debug, Clone)]
pub struct TempestProvider {
    station_id: String,
    api_token: String,
    base_url: String,
    http: Client,
}

impl TempestProvider {
    pub fn new(station_id: String, api_token: String, base_url: String) -> Self {
        Self {
            station_id,
            api_token,
            base_url,
            http: Client::new(),
        }
    }

    pub fn from_station(station: &StationConfig, base_url: &str) -> Self {
        Self::new(station.station_id.clone(), station.api_token.clone(), base_url.to_string())
    }

    fn url(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, self.station_id)
        } else {
            format!("{}/{}", self.base_url, self.station_id)
        }
    }
}

#[async_trait]
impl ObservationProvider for TempestProvider {
    async fn fetch(&self) -> Result<StationObservations> {
        tracing::debug!("Fetching observations for station {}", self.station_id);

        let res = self
            .http
            .get(self.url())
            .query(&[("token", self.api_token.as_str())])
            .send()
            .await
            .context("Failed to send request to Tempest (station observations)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Tempest observations response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Tempest observations request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: StationObservations =
            serde_json::from_str(&body).context("Failed to parse Tempest observations JSON")?;

        tracing::info!(
            "Fetched {} observation(s) for station {}",
            parsed.obs.as_ref().map_or(0, Vec::len),
            self.station_id
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
