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

use crate::states::WeatherStates;
use crate::weather::{Accumulation, Observation, TemperatureUnit};
use prometheus_client::encoding::{EncodeLabelSet, EncodeLabelValue, LabelValueEncoder};
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::error;
use std::fmt::{self, Write};
use std::sync::atomic::AtomicU64;

type FloatGauge = Gauge<f64, AtomicU64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    UnknownState(String),
    MissingField(&'static str),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownState(s) => write!(f, "unknown weather state '{}'", s),
            Self::MissingField(field) => write!(f, "missing required field {}", field),
        }
    }
}

impl error::Error for MappingError {}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
struct StateLabels {
    state: String,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum TemperatureField {
    Temp,
    TempMax,
    TempMin,
    FeelsLike,
}

impl EncodeLabelValue for TemperatureField {
    fn encode(&self, encoder: &mut LabelValueEncoder) -> Result<(), fmt::Error> {
        encoder.write_str(match self {
            Self::Temp => "temp",
            Self::TempMax => "temp_max",
            Self::TempMin => "temp_min",
            Self::FeelsLike => "feels_like",
        })
    }
}

impl EncodeLabelValue for TemperatureUnit {
    fn encode(&self, encoder: &mut LabelValueEncoder) -> Result<(), fmt::Error> {
        encoder.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
struct TemperatureLabels {
    system: TemperatureUnit,
    data: TemperatureField,
}

/// Value of the `metric_type` label used by the wind, pressure, rain, and sun gauges.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum MetricType {
    WindSpeed,
    WindDirection,
    Press,
    RainOneHour,
    RainThreeHours,
    Sunrise,
    Sunset,
}

impl EncodeLabelValue for MetricType {
    fn encode(&self, encoder: &mut LabelValueEncoder) -> Result<(), fmt::Error> {
        encoder.write_str(match self {
            Self::WindSpeed => "wind_speed",
            Self::WindDirection => "wind_direction",
            Self::Press => "press",
            Self::RainOneHour => "1 hour",
            Self::RainThreeHours => "3 hour",
            Self::Sunrise => "Sunrise",
            Self::Sunset => "Sunset",
        })
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
struct MetricTypeLabels {
    metric_type: MetricType,
}

impl From<MetricType> for MetricTypeLabels {
    fn from(metric_type: MetricType) -> Self {
        MetricTypeLabels { metric_type }
    }
}

/// Holder for metrics that can be set from an `Observation`.
///
/// All metrics are created and registered upon call to `WeatherMetrics::new()`. Each call to
/// `WeatherMetrics::observe()` overwrites the value of every metric, nothing from a previous
/// observation is retained. Metrics all share the prefix of the registry they are registered
/// with (`owm_` when using the registry built by the exporter binary).
#[derive(Debug)]
pub struct WeatherMetrics {
    states: WeatherStates,
    state: Family<StateLabels, Gauge>,
    temperature: Family<TemperatureLabels, FloatGauge>,
    cloudiness: FloatGauge,
    wind: Family<MetricTypeLabels, FloatGauge>,
    humidity: FloatGauge,
    pressure: Family<MetricTypeLabels, FloatGauge>,
    rain: Family<MetricTypeLabels, FloatGauge>,
    snow: FloatGauge,
    sun: Family<MetricTypeLabels, FloatGauge>,
}

impl WeatherMetrics {
    /// Create a new `WeatherMetrics` and register each metric with the provided `Registry`.
    ///
    /// Every known state is exported with a value of `0` until the first observation.
    pub fn new(reg: &mut Registry, states: WeatherStates) -> Self {
        let state = Family::<StateLabels, Gauge>::default();
        let temperature = Family::<TemperatureLabels, FloatGauge>::default();
        let cloudiness = FloatGauge::default();
        let wind = Family::<MetricTypeLabels, FloatGauge>::default();
        let humidity = FloatGauge::default();
        let pressure = Family::<MetricTypeLabels, FloatGauge>::default();
        let rain = Family::<MetricTypeLabels, FloatGauge>::default();
        let snow = FloatGauge::default();
        let sun = Family::<MetricTypeLabels, FloatGauge>::default();

        for s in states.iter() {
            state.get_or_create(&StateLabels { state: s.to_owned() }).set(0);
        }

        reg.register("current_weather_state", "Current weather state", state.clone());
        reg.register(
            "current_temperature",
            "Current temperature by unit system",
            temperature.clone(),
        );
        reg.register("cloudiness", "Current cloudiness percentage", cloudiness.clone());
        reg.register("wind", "Current wind speed (m/s) and direction (degrees)", wind.clone());
        reg.register("humidity", "Current humidity percentage", humidity.clone());
        reg.register("pressure", "Current atmospheric pressure in hPa", pressure.clone());
        reg.register("rain", "Rain volume in mm", rain.clone());
        reg.register("snow", "Snow volume in mm", snow.clone());
        reg.register("sun", "Sunrise and sunset as UNIX timestamps", sun.clone());

        Self {
            states,
            state,
            temperature,
            cloudiness,
            wind,
            humidity,
            pressure,
            rain,
            snow,
            sun,
        }
    }

    /// Set every metric from the provided observation.
    ///
    /// Missing rain or snow windows are set to `0`. An unknown weather state or a missing
    /// wind direction results in an error and no metrics are modified.
    pub fn observe(&self, obs: &Observation) -> Result<(), MappingError> {
        let current = self
            .states
            .lookup(&obs.detailed_status)
            .ok_or_else(|| MappingError::UnknownState(obs.detailed_status.clone()))?;
        let wind_direction = obs.wind.deg.ok_or(MappingError::MissingField("wind.deg"))?;

        for s in self.states.iter() {
            let v = if s == current { 1 } else { 0 };
            self.state.get_or_create(&StateLabels { state: s.to_owned() }).set(v);
        }

        for unit in TemperatureUnit::ALL {
            let reading = obs.temperature.reading(unit);
            self.set_temperature(unit, TemperatureField::Temp, reading.temp);
            self.set_temperature(unit, TemperatureField::TempMax, reading.temp_max);
            self.set_temperature(unit, TemperatureField::TempMin, reading.temp_min);
            self.set_temperature(unit, TemperatureField::FeelsLike, reading.feels_like);
        }

        self.cloudiness.set(obs.clouds);
        self.humidity.set(obs.humidity);
        self.snow.set(obs.snow.get(Accumulation::ALL).unwrap_or(0.0));

        Self::set_typed(&self.wind, MetricType::WindSpeed, obs.wind.speed);
        Self::set_typed(&self.wind, MetricType::WindDirection, wind_direction);
        Self::set_typed(&self.pressure, MetricType::Press, obs.pressure);
        Self::set_typed(
            &self.rain,
            MetricType::RainOneHour,
            obs.rain.get(Accumulation::ONE_HOUR).unwrap_or(0.0),
        );
        Self::set_typed(
            &self.rain,
            MetricType::RainThreeHours,
            obs.rain.get(Accumulation::THREE_HOURS).unwrap_or(0.0),
        );
        Self::set_typed(&self.sun, MetricType::Sunrise, obs.sunrise as f64);
        Self::set_typed(&self.sun, MetricType::Sunset, obs.sunset as f64);

        Ok(())
    }

    fn set_temperature(&self, system: TemperatureUnit, data: TemperatureField, v: f64) {
        self.temperature
            .get_or_create(&TemperatureLabels { system, data })
            .set(v);
    }

    fn set_typed(family: &Family<MetricTypeLabels, FloatGauge>, metric_type: MetricType, v: f64) {
        family.get_or_create(&metric_type.into()).set(v);
    }
}
