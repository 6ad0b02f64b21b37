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

use std::collections::BTreeMap;

const KELVIN_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 459.67;
const FAHRENHEIT_SCALE: f64 = 9.0 / 5.0;

/// Unit system temperatures can be read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
            Self::Kelvin => "kelvin",
        }
    }

    /// Convert a value in kelvin to this unit.
    ///
    /// Celsius and fahrenheit are rounded to two decimal places, kelvin is returned as-is.
    pub fn convert(&self, kelvin: f64) -> f64 {
        match self {
            Self::Celsius => round2(kelvin - KELVIN_OFFSET),
            Self::Fahrenheit => round2(kelvin * FAHRENHEIT_SCALE - FAHRENHEIT_OFFSET),
            Self::Kelvin => kelvin,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Temperature readings for a single unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub temp: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub feels_like: f64,
}

/// Temperatures as reported by the API, in kelvin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    kelvin: TemperatureReading,
}

impl Temperature {
    pub fn from_kelvin(kelvin: TemperatureReading) -> Self {
        Temperature { kelvin }
    }

    pub fn reading(&self, unit: TemperatureUnit) -> TemperatureReading {
        TemperatureReading {
            temp: unit.convert(self.kelvin.temp),
            temp_max: unit.convert(self.kelvin.temp_max),
            temp_min: unit.convert(self.kelvin.temp_min),
            feels_like: unit.convert(self.kelvin.feels_like),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    /// Meters per second
    pub speed: f64,
    /// Meteorological degrees. Not always reported.
    pub deg: Option<f64>,
}

/// Precipitation volume in mm, keyed by window ("1h", "3h", or "all").
///
/// Rain or snow not being reported at all is normal and results in an empty accumulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulation {
    windows: BTreeMap<String, f64>,
}

impl Accumulation {
    pub const ONE_HOUR: &'static str = "1h";
    pub const THREE_HOURS: &'static str = "3h";
    pub const ALL: &'static str = "all";

    pub fn new<I, S>(windows: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Accumulation {
            windows: windows.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, window: &str) -> Option<f64> {
        self.windows.get(window).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Current conditions at a single location.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub location: String,
    /// UNIX timestamp of the observation
    pub reference_time: i64,
    pub detailed_status: String,
    pub temperature: Temperature,
    /// Percent
    pub clouds: f64,
    pub wind: Wind,
    /// Percent
    pub humidity: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    pub rain: Accumulation,
    pub snow: Accumulation,
    /// UNIX timestamp
    pub sunrise: i64,
    /// UNIX timestamp
    pub sunset: i64,
}

#[cfg(test)]
mod test {
    use super::{Accumulation, Temperature, TemperatureReading, TemperatureUnit};

    #[test]
    fn test_celsius_from_kelvin() {
        assert_eq!(10.0, TemperatureUnit::Celsius.convert(283.15));
        assert_eq!(-273.15, TemperatureUnit::Celsius.convert(0.0));
    }

    #[test]
    fn test_fahrenheit_from_kelvin() {
        assert_eq!(50.0, TemperatureUnit::Fahrenheit.convert(283.15));
        assert_eq!(32.0, TemperatureUnit::Fahrenheit.convert(273.15));
    }

    #[test]
    fn test_kelvin_not_rounded() {
        assert_eq!(283.156, TemperatureUnit::Kelvin.convert(283.156));
    }

    #[test]
    fn test_temperature_reading() {
        let temp = Temperature::from_kelvin(TemperatureReading {
            temp: 283.15,
            temp_max: 285.15,
            temp_min: 281.15,
            feels_like: 282.15,
        });

        let c = temp.reading(TemperatureUnit::Celsius);
        assert_eq!(10.0, c.temp);
        assert_eq!(12.0, c.temp_max);
        assert_eq!(8.0, c.temp_min);
        assert_eq!(9.0, c.feels_like);
    }

    #[test]
    fn test_accumulation_missing_window() {
        let rain = Accumulation::new([("1h", 2.5)]);
        assert_eq!(Some(2.5), rain.get(Accumulation::ONE_HOUR));
        assert_eq!(None, rain.get(Accumulation::THREE_HOURS));
        assert!(Accumulation::default().is_empty());
    }
}
