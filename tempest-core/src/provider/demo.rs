use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::model::{Observation, StationObservations};

use super::ObservationProvider;

/// Serves a fixed sample observation stamped with the current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ObservationProvider for DemoProvider {
    async fn fetch(&self) -> Result<StationObservations> {
        Ok(StationObservations::from_observation(Observation::demo(
            Utc::now().timestamp(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_returns_one_current_observation() {
        let before = Utc::now().timestamp();
        let payload = DemoProvider::new().fetch().await.expect("demo never fails");
        let obs = payload.latest().expect("one observation");

        assert!(obs.timestamp >= before);
        assert_eq!(obs.air_temperature, 29.4);
        assert_eq!(obs.relative_humidity, 65.0);
    }
}
