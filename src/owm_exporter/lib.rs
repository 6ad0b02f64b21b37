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

//! Prometheus metrics exporter for OpenWeatherMap
//!
//! ## Features
//!
//! `owm_exporter` fetches current weather conditions for a single location using the
//! [OpenWeatherMap] current weather API and emits them as Prometheus metrics. Conditions are
//! fetched every 15 seconds by default. The following metrics are emitted.
//!
//! * `owm_current_weather_state{state=$STATE}` - `1` for the current detailed status (e.g. "light rain"),
//!   `0` for every other known status.
//! * `owm_current_temperature{system=$SYSTEM, data=$DATA}` - Temperature where `system` is one of
//!   `celsius`, `fahrenheit`, or `kelvin` and `data` is one of `temp`, `temp_max`, `temp_min`, or `feels_like`.
//! * `owm_cloudiness` - Cloudiness percentage (0-100).
//! * `owm_wind{metric_type=$TYPE}` - Wind speed in meters per second (`wind_speed`) and direction
//!   in degrees (`wind_direction`).
//! * `owm_humidity` - Relative humidity (0-100).
//! * `owm_pressure{metric_type="press"}` - Atmospheric pressure, in hPa.
//! * `owm_rain{metric_type=$TYPE}` - Rain volume for the last `1 hour` and `3 hour`, in mm. `0` when not reported.
//! * `owm_snow` - Snow volume, in mm. `0` when not reported.
//! * `owm_sun{metric_type=$TYPE}` - `Sunrise` and `Sunset` as UNIX timestamps.
//!
//! [OpenWeatherMap]: https://openweathermap.org/current
//!
//! ### Migrating from pyowm-exporter
//!
//! Metric names and labels are compatible with `pyowm-exporter` except for the following renames, which
//! dashboards and alerts built against it will need to be updated for.
//!
//! * Every metric uses the prefix `owm_` instead of `pyowm_`.
//! * `pyowm_current_temperature_metric{system, data}` is now `owm_current_temperature{system, data}`.
//! * `pyowm_current_weather_state{pyowm_current_weather_state=$STATE}` is now
//!   `owm_current_weather_state{state=$STATE}`.
//!
//! All other metrics keep their name (with the new prefix), labels, and label values.
//!
//! ## Build
//!
//! `owm_exporter` is a Rust program and must be built from source using a [Rust toolchain](https://rustup.rs/).
//!
//! ```text
//! cargo build --release
//! ```
//!
//! ## Usage
//!
//! ### API key
//!
//! An OpenWeatherMap API key is required. It is read from an INI file, `config/owm_exporter.cfg` by
//! default (use `--config` to pick a different file). Relative paths are resolved against the current
//! working directory, so either start `owm_exporter` from the directory containing `config/` or pass an
//! absolute path.
//!
//! ```text
//! [prod]
//! api_key = YOUR_API_KEY
//! ```
//!
//! ### Run
//!
//! Pick a location by name and run `owm_exporter`. If no location is given, `herndon, virginia` is used.
//!
//! ```text
//! ./owm_exporter --config /etc/owm_exporter.cfg --location "boston, massachusetts"
//! ```
//!
//! `owm_exporter` stops with a non-zero exit code the first time it is unable to fetch current weather
//! or the API reports a weather status it doesn't know about. It is meant to be run under a supervisor
//! such as Systemd that will restart it.
//!
//! ### Prometheus
//!
//! Prometheus metrics are exposed on port `9119` at `/metrics`. Once `owm_exporter`
//! is running, configure scrapes of it by your Prometheus server. Add the host running
//! `owm_exporter` as a target under the Prometheus `scrape_configs` section as described by
//! the example below.
//!
//! ```yaml
//! # Sample config for Prometheus.
//!
//! global:
//!   scrape_interval:     15s
//!   evaluation_interval: 15s
//!   external_labels:
//!     monitor: 'my_prom'
//!
//! scrape_configs:
//! - job_name: owm_exporter
//!   static_configs:
//!   - targets: ['example:9119']
//! ```
//!

pub mod client;
pub mod config;
pub mod exporter;
pub mod http;
pub mod metrics;
pub mod states;
pub mod weather;
