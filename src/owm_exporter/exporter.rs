// owm_exporter - Prometheus metrics exporter for OpenWeatherMap
//
// Copyright 2026 owm_exporter contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::client::{ClientError, OpenWeatherClient};
use crate::metrics::{MappingError, WeatherMetrics};
use std::error;
use std::fmt;
use std::time::Duration;
use tracing::{Instrument, Level};

#[derive(Debug)]
pub enum ExporterError {
    Upstream(ClientError),
    Mapping(MappingError),
}

impl fmt::Display for ExporterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(e) => write!(f, "failed to fetch current weather: {}", e),
            Self::Mapping(e) => write!(f, "failed to update metrics: {}", e),
        }
    }
}

impl error::Error for ExporterError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Upstream(e) => Some(e),
            Self::Mapping(e) => Some(e),
        }
    }
}

/// Periodically fetch current weather for a location and update metrics from it.
///
/// The exporter is the only writer of its `WeatherMetrics`. Any failure fetching or
/// mapping an observation ends polling.
#[derive(Debug)]
pub struct Exporter {
    client: OpenWeatherClient,
    metrics: WeatherMetrics,
    location: String,
}

impl Exporter {
    pub fn new(client: OpenWeatherClient, metrics: WeatherMetrics, location: String) -> Self {
        Exporter {
            client,
            metrics,
            location,
        }
    }

    /// Fetch a single observation and update all metrics from it.
    pub async fn tick(&self) -> Result<(), ExporterError> {
        let obs = self
            .client
            .observation(&self.location)
            .instrument(tracing::span!(Level::DEBUG, "owm_observation"))
            .await
            .map_err(ExporterError::Upstream)?;

        self.metrics.observe(&obs).map_err(ExporterError::Mapping)?;
        tracing::info!(
            message = "fetched current weather",
            location = %obs.location,
            status = %obs.detailed_status,
            reference_time = obs.reference_time,
        );

        Ok(())
    }

    /// Call `tick()` and then sleep for `interval`, forever.
    ///
    /// Returns the first error encountered. Failed ticks are not retried.
    pub async fn run(&self, interval: Duration) -> ExporterError {
        tracing::info!(message = "weather polling started", location = %self.location, interval_secs = interval.as_secs());

        loop {
            if let Err(e) = self.tick().await {
                return e;
            }

            tokio::time::sleep(interval).await;
        }
    }
}
