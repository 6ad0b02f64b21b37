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

use crate::weather::{Accumulation, Observation, Temperature, TemperatureReading, Wind};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::error;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    Internal(reqwest::Error),
    InvalidBaseUrl(Url),
    InvalidLocation(String),
    Unauthorized,
    Unexpected(StatusCode, String),
    MissingConditions(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(e) => write!(f, "{}", e),
            Self::InvalidBaseUrl(u) => write!(f, "invalid base URL {}", u),
            Self::InvalidLocation(l) => write!(f, "invalid location {}", l),
            Self::Unauthorized => write!(f, "API key rejected"),
            Self::Unexpected(status, l) => write!(f, "unexpected status {} for location {}", status, l),
            Self::MissingConditions(l) => write!(f, "no weather conditions reported for location {}", l),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Internal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs include the API key as a query parameter
        ClientError::Internal(e.without_url())
    }
}

/// Client for the OpenWeatherMap current weather API.
pub struct OpenWeatherClient {
    client: Client,
    weather_url: Url,
    api_key: String,
}

impl OpenWeatherClient {
    const USER_AGENT: &'static str = "OWM Prometheus Exporter (https://github.com/owm-exporter/owm_exporter)";
    const JSON_RESPONSE: &'static str = "application/json";
    const LANGUAGE: &'static str = "en";

    pub fn new(client: Client, base_url: Url, api_key: String) -> Result<Self, ClientError> {
        let mut weather_url = base_url.clone();
        weather_url
            .path_segments_mut()
            .map(|mut p| {
                p.pop_if_empty().push("weather");
            })
            .map_err(|_| ClientError::InvalidBaseUrl(base_url))?;

        Ok(OpenWeatherClient {
            client,
            weather_url,
            api_key,
        })
    }

    /// Fetch current conditions for a place name such as "herndon, virginia".
    pub async fn observation(&self, location: &str) -> Result<Observation, ClientError> {
        tracing::debug!(message = "making current weather request", url = %self.weather_url, location = %location);

        let res = self.make_request(location).await?;
        let current = res.json::<CurrentWeather>().await?;
        current.into_observation(location)
    }

    async fn make_request(&self, location: &str) -> Result<Response, ClientError> {
        let mut url = self.weather_url.clone();
        url.query_pairs_mut()
            .append_pair("q", location)
            .append_pair("appid", &self.api_key)
            .append_pair("lang", Self::LANGUAGE);

        let res = self
            .client
            .get(url)
            .header(USER_AGENT, Self::USER_AGENT)
            .header(ACCEPT, Self::JSON_RESPONSE)
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::OK {
            Ok(res)
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::InvalidLocation(location.to_owned()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(ClientError::Unauthorized)
        } else {
            Err(ClientError::Unexpected(status, location.to_owned()))
        }
    }
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("client", &self.client)
            .field("weather_url", &self.weather_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Response body of the `/weather` endpoint.
#[derive(Deserialize, Debug)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: String,
    pub dt: i64,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: WindReadings,
    pub clouds: Clouds,
    pub rain: Option<Precipitation>,
    pub snow: Option<Precipitation>,
    pub sys: Sys,
}

#[derive(Deserialize, Debug)]
pub struct Condition {
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Deserialize, Debug)]
pub struct WindReadings {
    pub speed: f64,
    pub deg: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct Clouds {
    pub all: f64,
}

/// Rain or snow volume, either per window (`{"1h": 0.5}`) or as a bare total.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Precipitation {
    Total(f64),
    Windows(HashMap<String, f64>),
}

impl From<Precipitation> for Accumulation {
    fn from(p: Precipitation) -> Self {
        match p {
            Precipitation::Total(v) => Accumulation::new([(Accumulation::ALL, v)]),
            Precipitation::Windows(w) => Accumulation::new(w),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Sys {
    pub sunrise: i64,
    pub sunset: i64,
}

impl CurrentWeather {
    /// Convert the response into an `Observation`, failing if no conditions were reported.
    pub fn into_observation(self, location: &str) -> Result<Observation, ClientError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::MissingConditions(location.to_owned()))?;

        let name = if self.name.is_empty() {
            location.to_owned()
        } else {
            self.name
        };

        Ok(Observation {
            location: name,
            reference_time: self.dt,
            detailed_status: condition.description,
            temperature: Temperature::from_kelvin(TemperatureReading {
                temp: self.main.temp,
                temp_max: self.main.temp_max,
                temp_min: self.main.temp_min,
                feels_like: self.main.feels_like,
            }),
            clouds: self.clouds.all,
            wind: Wind {
                speed: self.wind.speed,
                deg: self.wind.deg,
            },
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            rain: self.rain.map(Accumulation::from).unwrap_or_default(),
            snow: self.snow.map(Accumulation::from).unwrap_or_default(),
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
        })
    }
}
