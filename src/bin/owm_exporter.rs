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

use clap::Parser;
use owm_exporter::client::OpenWeatherClient;
use owm_exporter::config::ExporterConfig;
use owm_exporter::exporter::Exporter;
use owm_exporter::http::RequestState;
use owm_exporter::metrics::WeatherMetrics;
use owm_exporter::states::WeatherStates;
use prometheus_client::registry::Registry;
use reqwest::{Client, Url};
use std::error::Error;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{self, SignalKind};
use tracing::Level;

const DEFAULT_LOG_LEVEL: Level = Level::INFO;
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 9119);
const DEFAULT_REFRESH_SECS: u64 = 15;
const DEFAULT_TIMEOUT_MILLIS: u64 = 5000;
const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/";
const DEFAULT_CONFIG: &str = "config/owm_exporter.cfg";
const DEFAULT_LOCATION: &str = "herndon, virginia";
const METRIC_PREFIX: &str = "owm";

#[derive(Debug, Parser)]
#[clap(name = "owm_exporter", version = clap::crate_version!())]
struct OwmExporterApplication {
    /// Path to an INI file with an 'api_key' setting in the 'prod' section. Relative paths,
    /// including the default, are resolved against the current working directory, not the
    /// directory containing the owm_exporter binary.
    #[clap(long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Name of the place to fetch current weather for, e.g. "boston, massachusetts"
    #[clap(long, default_value = DEFAULT_LOCATION)]
    location: String,

    /// Base URL for the OpenWeatherMap API
    #[clap(long, default_value = DEFAULT_API_URL)]
    api_url: Url,

    /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
    /// (case insensitive)
    #[clap(long, default_value_t = DEFAULT_LOG_LEVEL)]
    log_level: Level,

    /// Fetch current weather from the OpenWeatherMap API at this interval, in seconds.
    #[clap(long, default_value_t = DEFAULT_REFRESH_SECS)]
    refresh_secs: u64,

    /// Timeout for fetching current weather from the OpenWeatherMap API, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_MILLIS)]
    timeout_millis: u64,

    /// Address to bind to. By default, owm_exporter will bind to public address since
    /// the purpose is to expose metrics to an external system (Prometheus or another
    /// agent for ingestion)
    #[clap(long, default_value_t = DEFAULT_BIND_ADDR.into())]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let opts = OwmExporterApplication::parse();
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(opts.log_level)
            .finish(),
    )
    .expect("failed to set tracing subscriber");

    let config = ExporterConfig::from_file(&opts.config).unwrap_or_else(|e| {
        tracing::error!(message = "unable to load configuration", path = %opts.config.display(), error = %e);
        process::exit(1)
    });

    let timeout = Duration::from_millis(opts.timeout_millis);
    let http_client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize HTTP client", error = %e);
        process::exit(1)
    });

    let client = OpenWeatherClient::new(http_client, opts.api_url.clone(), config.api_key().to_owned()).unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize API client", error = %e);
        process::exit(1)
    });

    let mut registry = Registry::with_prefix(METRIC_PREFIX);
    let metrics = WeatherMetrics::new(&mut registry, WeatherStates::default());
    let exporter = Exporter::new(client, metrics, opts.location.clone());
    let interval = Duration::from_secs(opts.refresh_secs);

    let context = Arc::new(RequestState { registry });
    let app = owm_exporter::http::app(context);
    let server = axum::Server::try_bind(&opts.bind)
        .map(|s| s.serve(app.into_make_service()))
        .unwrap_or_else(|e| {
            tracing::error!(message = "error binding to address", address = %opts.bind, error = %e);
            process::exit(1)
        });

    tracing::info!(message = "server started", address = %server.local_addr(), api_url = %opts.api_url);
    let server = server.with_graceful_shutdown(async {
        // Wait for either SIGTERM or SIGINT to shutdown
        tokio::select! {
            _ = sigterm() => {}
            _ = sigint() => {}
        }
    });

    tokio::select! {
        e = exporter.run(interval) => {
            tracing::error!(message = "stopping after failure to update metrics", location = %opts.location, error = %e);
            process::exit(1)
        }
        res = server => res?,
    }

    tracing::info!("server shutdown");
    Ok(())
}

/// Return after the first SIGTERM signal received by this process
async fn sigterm() -> io::Result<()> {
    unix::signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

/// Return after the first SIGINT signal received by this process
async fn sigint() -> io::Result<()> {
    unix::signal(SignalKind::interrupt())?.recv().await;
    Ok(())
}
