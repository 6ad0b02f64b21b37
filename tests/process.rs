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

use std::fs;
use std::process::Output;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXPORTER_BIN: &str = env!("CARGO_BIN_EXE_owm_exporter");

async fn run_exporter(args: &[&str]) -> Output {
    let res = tokio::time::timeout(
        Duration::from_secs(30),
        Command::new(EXPORTER_BIN)
            .args(["--bind", "127.0.0.1:0", "--log-level", "info"])
            .args(args)
            .kill_on_drop(true)
            .output(),
    )
    .await;

    res.expect("exporter did not exit").unwrap()
}

#[tokio::test]
async fn test_exits_on_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("owm_exporter.cfg");
    fs::write(&config, "[prod]\napi_key = abc123\n").unwrap();

    let uri = server.uri();
    let output = run_exporter(&["--config", config.to_str().unwrap(), "--api-url", &uri]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(Some(1), output.status.code());
    assert!(stdout
        .lines()
        .any(|l| l.contains("ERROR") && l.contains("stopping after failure to update metrics")));
    assert!(!stdout.contains("abc123"));
}

#[tokio::test]
async fn test_exits_on_missing_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("does-not-exist.cfg");

    let output = run_exporter(&["--config", config.to_str().unwrap(), "--api-url", "http://127.0.0.1:9/"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(Some(1), output.status.code());
    assert!(stdout
        .lines()
        .any(|l| l.contains("ERROR") && l.contains("unable to load configuration")));
}

#[tokio::test]
async fn test_help_describes_config_path_resolution() {
    let output = run_exporter(&["--help"]).await;
    // Help text is wrapped to the terminal width
    let help = String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    assert!(output.status.success());
    assert!(help.contains("config/owm_exporter.cfg"));
    assert!(help.contains("resolved against the current working directory"));
}
