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

use serde::Deserialize;
use std::error;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    Invalid(PathBuf, ::config::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(p) => write!(f, "configuration file {} not found", p.display()),
            Self::Invalid(p, e) => write!(f, "invalid configuration file {}: {}", p.display(), e),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Invalid(_, e) => Some(e),
            _ => None,
        }
    }
}

/// Settings read from the INI configuration file.
///
/// ```text
/// [prod]
/// api_key = 0123456789abcdef
/// ```
#[derive(Deserialize)]
pub struct ExporterConfig {
    pub prod: ProdSection,
}

#[derive(Deserialize)]
pub struct ProdSection {
    pub api_key: String,
}

impl ExporterConfig {
    /// Load configuration from an INI file at `path`, which must exist and contain
    /// an `api_key` in the `prod` section.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        ::config::Config::builder()
            .add_source(::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Ini).required(true))
            .build()
            .and_then(|c| c.try_deserialize::<ExporterConfig>())
            .map_err(|e| ConfigError::Invalid(path.to_path_buf(), e))
    }

    pub fn api_key(&self) -> &str {
        &self.prod.api_key
    }
}

impl fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterConfig").field("api_key", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod test {
    use super::{ConfigError, ExporterConfig};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owm_exporter.cfg");
        fs::write(&path, "[prod]\napi_key = abc123\n").unwrap();

        let config = ExporterConfig::from_file(&path).unwrap();
        assert_eq!("abc123", config.api_key());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owm_exporter.cfg");

        assert!(matches!(ExporterConfig::from_file(&path), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_from_file_missing_section() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owm_exporter.cfg");
        fs::write(&path, "[dev]\napi_key = abc123\n").unwrap();

        assert!(matches!(ExporterConfig::from_file(&path), Err(ConfigError::Invalid(_, _))));
    }

    #[test]
    fn test_from_file_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owm_exporter.cfg");
        fs::write(&path, "[prod]\nlocation = herndon\n").unwrap();

        assert!(matches!(ExporterConfig::from_file(&path), Err(ConfigError::Invalid(_, _))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owm_exporter.cfg");
        fs::write(&path, "[prod]\napi_key = abc123\n").unwrap();

        let config = ExporterConfig::from_file(&path).unwrap();
        assert!(!format!("{:?}", config).contains("abc123"));
    }
}
