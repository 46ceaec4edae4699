//! Periodic re-fetching of station observations.

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{
    provider::ObservationProvider,
    store::{ObservationStore, Snapshot},
};

/// Fetches from a provider into a store, once or on an interval.
#[derive(Debug)]
pub struct Refresher {
    provider: Box<dyn ObservationProvider>,
    fallback: Option<Box<dyn ObservationProvider>>,
    store: ObservationStore,
    interval: Duration,
}

impl Refresher {
    pub fn new(
        provider: Box<dyn ObservationProvider>,
        store: ObservationStore,
        interval: Duration,
    ) -> Self {
        Self {
            provider,
            fallback: None,
            store,
            interval,
        }
    }

    /// Serve `fallback`'s data when the provider fails.
    pub fn with_fallback(mut self, fallback: Box<dyn ObservationProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Fetch once. The store is only touched when the provider succeeds.
    ///
    /// If the provider fails and a fallback is set, the fallback's payload is
    /// returned as a snapshot marked `fallback` and the store keeps whatever
    /// it held before.
    pub async fn refresh_once(&self) -> anyhow::Result<Snapshot> {
        let err = match self.provider.fetch().await {
            Ok(payload) => return Ok(self.store.replace(payload)),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(err);
        };

        tracing::warn!("Observation fetch failed, using fallback data: {:#}", err);
        let payload = fallback.fetch().await?;
        Ok(Snapshot {
            payload,
            fetched_at: Utc::now(),
            fallback: true,
        })
    }

    /// Refresh on every tick until `shutdown` is cancelled.
    ///
    /// The first refresh happens immediately. A failed refresh is logged and
    /// the loop carries on with the next tick.
    pub async fn run<F>(&self, mut on_update: F, shutdown: CancellationToken)
    where
        F: FnMut(&Snapshot),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::info!("Refresh loop stopped");
                    return;
                }
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::info!("Refresh loop stopped");
                    return;
                }
                result = self.refresh_once() => result,
            };

            match result {
                Ok(snapshot) => on_update(&snapshot),
                Err(e) => tracing::warn!("Refresh failed: {:#}", e),
            }
        }
    }
}
