use crate::{
    Config, StationObservations,
    provider::{demo::DemoProvider, tempest::TempestProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod demo;
pub mod tempest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Tempest,
    Demo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Tempest => "tempest",
            ProviderId::Demo => "demo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Tempest, ProviderId::Demo]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "tempest" => Ok(ProviderId::Tempest),
            "demo" => Ok(ProviderId::Demo),
            _ => {
                let supported: Vec<&str> =
                    ProviderId::all().iter().map(ProviderId::as_str).collect();
                Err(anyhow::anyhow!(
                    "Unknown provider '{value}'. Supported providers: {}.",
                    supported.join(", ")
                ))
            }
        }
    }
}

/// A source of station observation payloads.
///
/// Each call is an independent fetch; implementations hold no state that a
/// failed fetch could leave half-updated.
#[async_trait]
pub trait ObservationProvider: Send + Sync + Debug {
    async fn fetch(&self) -> anyhow::Result<StationObservations>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn ObservationProvider>> {
    let boxed: Box<dyn ObservationProvider> = match id {
        ProviderId::Tempest => {
            let station = config.station()?;
            Box::new(TempestProvider::from_station(station, &config.api_url))
        }
        ProviderId::Demo => Box::new(DemoProvider::new()),
    };

    Ok(boxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_is_case_insensitive() {
        assert_eq!(ProviderId::try_from("Tempest").unwrap(), ProviderId::Tempest);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
        assert!(err.to_string().contains("Supported providers: tempest, demo."));
    }

    #[test]
    fn tempest_provider_errors_when_station_missing() {
        let cfg = Config::default();
        let err = provider_from_config(ProviderId::Tempest, &cfg).unwrap_err();
        assert!(err.to_string().contains("No station configured"));
    }

    #[test]
    fn tempest_provider_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_station("142632".to_string(), "TOKEN".to_string());

        assert!(provider_from_config(ProviderId::Tempest, &cfg).is_ok());
    }

    #[test]
    fn demo_provider_needs_no_config() {
        assert!(provider_from_config(ProviderId::Demo, &Config::default()).is_ok());
    }
}
