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

/// Detailed status descriptions OpenWeatherMap may report for current conditions.
///
/// Spelling and capitalization must match exactly what the API reports.
pub const KNOWN_STATES: &[&str] = &[
    "thunderstorm with light rain",
    "thunderstorm with rain",
    "thunderstorm with heavy rain",
    "light thunderstorm",
    "thunderstorm",
    "heavy thunderstorm",
    "ragged thunderstorm",
    "thunderstorm with light drizzle",
    "thunderstorm with drizzle",
    "thunderstorm with heavy drizzle",
    "light intensity drizzle",
    "drizzle",
    "heavy intensity drizzle",
    "light intensity drizzle rain",
    "drizzle rain",
    "heavy intensity drizzle rain",
    "shower rain and drizzle",
    "heavy shower rain and drizzle",
    "shower drizzle",
    "light rain",
    "moderate rain",
    "heavy intensity rain",
    "very heavy rain",
    "extreme rain",
    "freezing rain",
    "light intensity shower rain",
    "shower rain",
    "heavy intensity shower rain",
    "ragged shower rain",
    "light snow",
    "Snow",
    "Heavy snow",
    "Sleet",
    "Light shower sleet",
    "Shower sleet",
    "Light rain and snow",
    "Rain and snow",
    "Light shower snow",
    "Shower snow",
    "Heavy shower snow",
    "mist",
    "Smoke",
    "Haze",
    "sand/ dust whirls",
    "fog",
    "sand",
    "dust",
    "volcanic ash",
    "squalls",
    "tornado",
    "clear sky",
    "few clouds",
    "scattered clouds",
    "broken clouds",
    "overcast clouds",
];

/// Closed set of weather states that can be exported.
///
/// Any status reported by the API must be a member of this set, callers treat a status
/// that isn't as an error. Membership is an exact, case-sensitive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherStates {
    states: Vec<String>,
}

impl WeatherStates {
    pub fn new<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for s in states {
            let s = s.into();
            if !out.contains(&s) {
                out.push(s);
            }
        }

        WeatherStates { states: out }
    }

    /// Get `status` back if it is a known state.
    pub fn lookup(&self, status: &str) -> Option<&str> {
        self.states.iter().find(|s| *s == status).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for WeatherStates {
    fn default() -> Self {
        Self::new(KNOWN_STATES.iter().copied())
    }
}

#[cfg(test)]
mod test {
    use super::{WeatherStates, KNOWN_STATES};

    #[test]
    fn test_default_states_all_known() {
        let states = WeatherStates::default();
        assert_eq!(55, states.len());

        for s in KNOWN_STATES {
            assert_eq!(Some(*s), states.lookup(s));
        }
    }

    #[test]
    fn test_lookup_case_sensitive() {
        let states = WeatherStates::default();
        assert_eq!(None, states.lookup("snow"));
        assert_eq!(None, states.lookup("Clear Sky"));
        assert_eq!(None, states.lookup("CLEAR SKY"));
        assert_eq!(None, states.lookup("Fog"));
    }

    #[test]
    fn test_lookup_unknown() {
        let states = WeatherStates::default();
        assert_eq!(None, states.lookup("raining frogs"));
        assert_eq!(None, states.lookup(""));
        assert_eq!(None, states.lookup("clear sky "));
    }

    #[test]
    fn test_new_drops_duplicates() {
        let states = WeatherStates::new(["fog", "mist", "fog", "Fog"]);
        assert_eq!(vec!["fog", "mist", "Fog"], states.iter().collect::<Vec<_>>());
    }
}
