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

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::routing::get;
use axum::Router;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const TEXT_FORMAT: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Global state shared between all HTTP requests via `Arc`.
#[derive(Debug)]
pub struct RequestState {
    pub registry: Registry,
}

/// Build the router serving metrics at `/metrics`. All other paths return a 404.
pub fn app(state: Arc<RequestState>) -> Router {
    Router::new()
        .route("/metrics", get(text_metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Encode every metric in the registry in the OpenMetrics text format.
pub async fn text_metrics_handler(State(state): State<Arc<RequestState>>) -> (StatusCode, HeaderMap, String) {
    let mut buf = String::new();
    let mut headers = HeaderMap::new();

    match encode(&mut buf, &state.registry) {
        Ok(_) => {
            tracing::debug!(message = "encoded prometheus metrics to text format", bytes = buf.len());
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_FORMAT));
            (StatusCode::OK, headers, buf)
        }
        Err(e) => {
            tracing::error!(message = "error encoding metrics to text format", error = %e);
            (StatusCode::INTERNAL_SERVER_ERROR, headers, String::new())
        }
    }
}

#[cfg(test)]
mod test {
    use super::{text_metrics_handler, RequestState, TEXT_FORMAT};
    use axum::extract::State;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use prometheus_client::metrics::gauge::Gauge;
    use prometheus_client::registry::Registry;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_text_metrics_handler() {
        let mut registry = Registry::with_prefix("owm");
        let humidity = Gauge::<i64>::default();
        humidity.set(65);
        registry.register("humidity", "Current humidity percentage", humidity);

        let state = Arc::new(RequestState { registry });
        let (status, headers, body) = text_metrics_handler(State(state)).await;

        assert_eq!(StatusCode::OK, status);
        assert_eq!(TEXT_FORMAT, headers.get(CONTENT_TYPE).unwrap());
        assert!(body.contains("owm_humidity 65"));
        assert!(body.ends_with("# EOF\n"));
    }
}
