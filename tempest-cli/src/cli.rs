use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, Text, required};
use std::time::Duration;
use tempest_core::{
    Config, DerivedMetrics, ObservationStore, ProviderId, Refresher, Snapshot, format,
    provider::{demo::DemoProvider, provider_from_config},
};
use tokio_util::sync::CancellationToken;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tempest", version, about = "Tempest weather station CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the station id and API token.
    Configure,

    /// Fetch the current observation once and print it.
    Show {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Keep refreshing the current observation until interrupted.
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between refreshes; defaults to the configured interval.
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[derive(Debug, clap::Args)]
pub struct SourceArgs {
    /// Which set of readings to print.
    #[arg(long, value_enum, default_value_t = View::Dashboard)]
    view: View,

    /// Where readings come from: `tempest` (station API) or `demo` (sample data).
    #[arg(long, default_value_t = ProviderId::Tempest, value_parser = parse_provider)]
    provider: ProviderId,
}

fn parse_provider(value: &str) -> Result<ProviderId, String> {
    ProviderId::try_from(value).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Every reading and derived metric.
    Dashboard,
    /// Temperature, humidity and wind.
    Summary,
    /// Pressure, UV and dew point.
    Cards,
    /// Whether it's too hot to ride.
    Riding,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { source } => {
                let config = Config::load()?;
                let refresher =
                    build_refresher(&config, source.provider, config.refresh_interval())?;

                let snapshot = refresher.refresh_once().await?;
                print!("{}", render(&snapshot, source.view));
                Ok(())
            }
            Command::Watch {
                source,
                interval_secs,
            } => {
                let config = Config::load()?;
                let interval = interval_secs
                    .map(|secs| Duration::from_secs(secs.max(1)))
                    .unwrap_or_else(|| config.refresh_interval());
                let refresher = build_refresher(&config, source.provider, interval)?;

                let shutdown = CancellationToken::new();
                let ctrl_c = shutdown.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        ctrl_c.cancel();
                    }
                });

                tracing::info!(
                    "Refreshing from {} every {}s, press Ctrl-C to stop",
                    source.provider,
                    interval.as_secs()
                );
                refresher
                    .run(
                        |snapshot| {
                            println!(
                                "--- {} ---",
                                snapshot.fetched_at.with_timezone(&Local).format("%H:%M:%S")
                            );
                            print!("{}", render(snapshot, source.view));
                        },
                        shutdown,
                    )
                    .await;
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current = config.station.clone();

    let mut station_prompt = Text::new("Station id:").with_validator(required!());
    if let Some(station) = &current {
        station_prompt = station_prompt.with_default(&station.station_id);
    }
    let station_id = station_prompt.prompt().context("Failed to read station id")?;

    let api_token = Password::new("API token:")
        .without_confirmation()
        .with_validator(required!())
        .prompt()
        .context("Failed to read API token")?;

    config.set_station(station_id.trim().to_string(), api_token.trim().to_string());
    config.save()?;

    println!("Saved station {} to {}", station_id.trim(), Config::config_file_path()?.display());
    Ok(())
}

/// The station API falls back to sample data when it can't be reached.
fn build_refresher(
    config: &Config,
    provider: ProviderId,
    interval: Duration,
) -> anyhow::Result<Refresher> {
    let refresher =
        Refresher::new(provider_from_config(provider, config)?, ObservationStore::new(), interval);

    Ok(match provider {
        ProviderId::Tempest => refresher.with_fallback(Box::new(DemoProvider::new())),
        ProviderId::Demo => refresher,
    })
}

const FALLBACK_NOTE: &str = "Station unreachable, showing sample data.";

fn render(snapshot: &Snapshot, view: View) -> String {
    let body = render_body(snapshot, view);
    if snapshot.fallback {
        format!("{FALLBACK_NOTE}\n{body}")
    } else {
        body
    }
}

fn render_body(snapshot: &Snapshot, view: View) -> String {
    let obs = match snapshot.payload.latest() {
        Ok(obs) => obs,
        Err(e) => {
            tracing::warn!("{}", e);
            let message = match view {
                View::Riding => format::NO_RIDING_DATA_MESSAGE,
                _ => format::NO_DATA_MESSAGE,
            };
            return format!("{message}\n");
        }
    };

    let metrics = DerivedMetrics::from_observation(obs);

    match view {
        View::Dashboard => format::render_cards(&format::dashboard_cards(obs, &metrics)),
        View::Summary => format::render_cards(&format::summary_items(obs)),
        View::Cards => format::render_cards(&format::weather_cards(obs, &metrics)),
        View::Riding => {
            let indicator = format::riding_indicator(&metrics);
            format!(
                "[{}] {}\n{}\n{}\n",
                metrics.riding.tier.as_str().to_uppercase(),
                indicator.title,
                indicator.description,
                indicator.value
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempest_core::{Observation, StationObservations};

    fn snapshot(payload: StationObservations) -> Snapshot {
        Snapshot {
            payload,
            fetched_at: Utc::now(),
            fallback: false,
        }
    }

    #[test]
    fn cli_parses_watch_arguments() {
        let cli = Cli::try_parse_from([
            "tempest",
            "watch",
            "--interval-secs",
            "30",
            "--view",
            "riding",
        ])
        .expect("valid arguments");

        match cli.command {
            Command::Watch { source, interval_secs } => {
                assert_eq!(interval_secs, Some(30));
                assert_eq!(source.view, View::Riding);
                assert_eq!(source.provider, ProviderId::Tempest);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_parses_provider_argument() {
        let cli = Cli::try_parse_from(["tempest", "show", "--provider", "Demo"])
            .expect("valid arguments");

        match cli.command {
            Command::Show { source } => assert_eq!(source.provider, ProviderId::Demo),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_provider() {
        let err = Cli::try_parse_from(["tempest", "show", "--provider", "openweather"])
            .unwrap_err()
            .to_string();

        assert!(err.contains("Supported providers: tempest, demo."), "{err}");
    }

    #[test]
    fn render_no_data_messages() {
        let empty = snapshot(StationObservations::default());

        assert_eq!(render(&empty, View::Dashboard), "Unable to load weather data\n");
        assert_eq!(render(&empty, View::Riding), "Unable to calculate riding conditions\n");
    }

    #[test]
    fn render_riding_view() {
        let snap = snapshot(StationObservations::from_observation(Observation::demo(0)));
        let text = render(&snap, View::Riding);

        assert!(text.starts_with("[CAUTION] Ride with Caution\n"));
        assert!(text.contains("Wet Bulb Temperature: 75.7°F"));
    }

    #[test]
    fn render_marks_fallback_data() {
        let mut snap = snapshot(StationObservations::from_observation(Observation::demo(0)));
        snap.fallback = true;

        let text = render(&snap, View::Summary);
        assert!(text.starts_with("Station unreachable, showing sample data.\n"));
        assert!(text.contains("84.9°F"));
    }

    #[test]
    fn demo_provider_does_not_need_a_station() {
        let interval = Duration::from_secs(60);
        assert!(build_refresher(&Config::default(), ProviderId::Demo, interval).is_ok());
        assert!(build_refresher(&Config::default(), ProviderId::Tempest, interval).is_err());
    }

    #[tokio::test]
    async fn demo_refresh_is_stored_as_a_real_fetch() {
        let refresher =
            build_refresher(&Config::default(), ProviderId::Demo, Duration::from_secs(60))
                .expect("demo needs no station");

        let snapshot = refresher.refresh_once().await.expect("demo never fails");
        assert!(!snapshot.fallback);
    }
}
