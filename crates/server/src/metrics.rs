use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{web, Error};
use autoroute_common::{AutoRouteError, Result};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::state::AppState;

/// Label used when a request matched no route
const UNMATCHED: &str = "none";

/// Prometheus HTTP request metrics
///
/// Each instance owns its registry, so several apps in one process (tests)
/// never collide on metric names.
pub struct HttpMetrics {
    registry: Registry,
    pub(crate) requests: IntCounterVec,
    pub(crate) latency: HistogramVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "Total number of requests by method, handler and status class",
            ),
            &["method", "handler", "status"],
        )
        .map_err(metrics_error)?;

        let latency = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Request latency in seconds by method and handler",
            ),
            &["method", "handler"],
        )
        .map_err(metrics_error)?;

        registry
            .register(Box::new(requests.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(latency.clone()))
            .map_err(metrics_error)?;

        Ok(Self {
            registry,
            requests,
            latency,
        })
    }

    /// Record one finished request
    pub fn observe(&self, method: &str, handler: &str, status: StatusCode, elapsed: Duration) {
        let class = format!("{}xx", status.as_u16() / 100);
        self.requests
            .with_label_values(&[method, handler, class.as_str()])
            .inc();
        self.latency
            .with_label_values(&[method, handler])
            .observe(elapsed.as_secs_f64());
    }

    /// Registry contents in the Prometheus text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(metrics_error)?;
        String::from_utf8(buf).map_err(|e| AutoRouteError::internal(e.to_string()))
    }
}

fn metrics_error(err: prometheus::Error) -> AutoRouteError {
    AutoRouteError::internal(format!("Metrics error: {}", err))
}

/// Middleware counting and timing every request
///
/// Requests are labelled by route pattern rather than raw path.
pub async fn track_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> std::result::Result<ServiceResponse<impl MessageBody>, Error> {
    let state = req.app_data::<web::Data<Arc<AppState>>>().cloned();
    let method = req.method().to_string();
    let start = Instant::now();

    let res = next.call(req).await?;

    if let Some(state) = state {
        let handler = res
            .request()
            .match_pattern()
            .unwrap_or_else(|| UNMATCHED.to_string());
        state
            .metrics
            .observe(&method, &handler, res.status(), start.elapsed());
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_groups_status_class() {
        let metrics = HttpMetrics::new().unwrap();
        metrics.observe("GET", "/health", StatusCode::OK, Duration::from_millis(2));
        metrics.observe("GET", "/health", StatusCode::NO_CONTENT, Duration::from_millis(3));
        metrics.observe("POST", "/chat", StatusCode::BAD_REQUEST, Duration::from_millis(1));

        assert_eq!(
            metrics
                .requests
                .with_label_values(&["GET", "/health", "2xx"])
                .get(),
            2
        );
        assert_eq!(
            metrics
                .requests
                .with_label_values(&["POST", "/chat", "4xx"])
                .get(),
            1
        );
        assert_eq!(
            metrics
                .latency
                .with_label_values(&["GET", "/health"])
                .get_sample_count(),
            2
        );

        let text = metrics.render().unwrap();
        assert!(text.contains("# TYPE http_requests_total counter"));
        assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
    }
}
