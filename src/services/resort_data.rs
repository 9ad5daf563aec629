//! Resort data fetcher
//!
//! One fetcher per configured resort. The host calls [`ResortDataFetcher::tick`]
//! on every scheduling pass; a real request only goes out once the last
//! successful update is older than the staleness threshold, or when forced.
//!
//! Failure handling by kind:
//! - non-200 status, timeout, unparsable body: logged, `Ok(false)`, readings kept
//! - transport error or missing opening hours: `Err`, readings kept
//!
//! The staleness clock only advances on success, so a failed attempt is
//! retried on the next tick.

use crate::client::FnuggClient;
use crate::config::{PollingConfig, ResortEntry};
use crate::error::{FnuggError, Result};
use crate::services::reading_registry::ReadingRegistry;
use crate::services::readings::ReadingSet;
use crate::services::resort_transform::ResortTransform;
use crate::services::sensor_entity::ResortSensor;
use chrono::{DateTime, Datelike, Local, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Readings are still fresh; nothing was requested
    Skipped,
    /// New readings installed
    Updated,
    /// Request made but soft-failed; previous readings kept
    Stale,
}

pub struct ResortDataFetcher {
    client: FnuggClient,
    registry: Arc<ReadingRegistry>,
    entry: ResortEntry,
    transform: ResortTransform,
    staleness_threshold: Duration,
    readings: ReadingSet,
    last_updated: Option<DateTime<Utc>>,
    last_outcome: Option<RefreshOutcome>,
}

impl ResortDataFetcher {
    pub fn new(
        client: FnuggClient,
        registry: Arc<ReadingRegistry>,
        entry: ResortEntry,
        polling: &PollingConfig,
    ) -> Self {
        Self {
            client,
            registry,
            entry,
            transform: ResortTransform::new(polling.strict_opening_hours),
            staleness_threshold: polling.staleness_threshold,
            readings: ReadingSet::new(),
            last_updated: None,
            last_outcome: None,
        }
    }

    pub fn entry(&self) -> &ResortEntry {
        &self.entry
    }

    /// Last successfully installed snapshot (empty until the first success)
    pub fn readings(&self) -> &ReadingSet {
        &self.readings
    }

    /// Time of the last successful update
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn last_outcome(&self) -> Option<RefreshOutcome> {
        self.last_outcome
    }

    /// Whether a non-forced tick at `now` would hit the network
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        let Some(last_updated) = self.last_updated else {
            return true;
        };
        // A clock that moved backwards counts as fresh.
        match (now - last_updated).to_std() {
            Ok(elapsed) => elapsed >= self.staleness_threshold,
            Err(_) => false,
        }
    }

    /// Sensor views for every reading in the current snapshot
    pub fn sensors(&self) -> Vec<ResortSensor> {
        self.readings
            .iter()
            .map(|reading| ResortSensor::from_reading(&self.entry, reading, &self.registry))
            .collect()
    }

    /// Throttled refresh driven by the host scheduler
    pub async fn tick(&mut self, force: bool) -> Result<RefreshOutcome> {
        self.tick_at(Utc::now(), force).await
    }

    /// [`Self::tick`] with an explicit notion of "now"
    pub async fn tick_at(&mut self, now: DateTime<Utc>, force: bool) -> Result<RefreshOutcome> {
        if !force && !self.is_stale_at(now) {
            debug!(resort_id = %self.entry.resort_id, "Readings still fresh, skipping refresh");
            return Ok(RefreshOutcome::Skipped);
        }

        let outcome = if self.refresh_at(now).await? {
            RefreshOutcome::Updated
        } else {
            RefreshOutcome::Stale
        };
        Ok(outcome)
    }

    /// Unconditional refresh; `Ok(false)` on a soft failure
    pub async fn refresh(&mut self) -> Result<bool> {
        self.refresh_at(Utc::now()).await
    }

    async fn refresh_at(&mut self, now: DateTime<Utc>) -> Result<bool> {
        let resort_id = self.entry.resort_id.clone();
        let url = self.client.resort_url(&resort_id)?;

        let response = match self.client.get(url).await {
            Ok(response) => response,
            Err(FnuggError::Timeout(msg)) => {
                warn!(resort_id = %resort_id, "Fnugg request timed out: {msg}");
                return Ok(self.soft_failure());
            }
            Err(e) => {
                error!(resort_id = %resort_id, error = %e, kind = e.category(), "Error connecting to Fnugg");
                return Err(e);
            }
        };

        if !response.is_ok() {
            error!(
                resort_id = %resort_id,
                status = %response.status,
                "Error connecting to Fnugg, unexpected response code"
            );
            return Ok(self.soft_failure());
        }

        let document = match response.json() {
            Ok(document) => document,
            Err(e) => {
                error!(resort_id = %resort_id, error = %e, "Fnugg returned a non-JSON body");
                return Ok(self.soft_failure());
            }
        };

        let weekday = now.with_timezone(&Local).weekday();
        let readings = self.transform.transform(&document, weekday).map_err(|e| {
            error!(resort_id = %resort_id, error = %e, "Failed to map Fnugg payload");
            e
        })?;

        info!(
            resort_id = %resort_id,
            readings = readings.len(),
            "Updated resort readings"
        );
        self.readings = readings;
        self.last_updated = Some(now);
        self.last_outcome = Some(RefreshOutcome::Updated);
        Ok(true)
    }

    fn soft_failure(&mut self) -> bool {
        self.last_outcome = Some(RefreshOutcome::Stale);
        false
    }
}
