use actix_web::{get, web, HttpResponse};
use prometheus::TEXT_FORMAT;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::HealthResponse;

/// Liveness check
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// Request metrics in the Prometheus text format
#[get("/metrics")]
pub async fn metrics(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let body = state.metrics.render()?;
    Ok(HttpResponse::Ok().content_type(TEXT_FORMAT).body(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::track_requests;
    use crate::routes::configure;
    use crate::test_support::{faq_docs, state_with};
    use actix_web::http::StatusCode;
    use actix_web::middleware::from_fn;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }

    #[actix_web::test]
    async fn test_requests_are_counted_and_exposed() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(from_fn(track_requests))
                .configure(configure),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::get().uri("/health").to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }
        let req = test::TestRequest::get().uri("/search").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        let req = test::TestRequest::get().uri("/no-such-page").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let requests = &state.metrics.requests;
        assert_eq!(requests.with_label_values(&["GET", "/health", "2xx"]).get(), 2);
        assert_eq!(requests.with_label_values(&["GET", "/search", "4xx"]).get(), 1);
        assert_eq!(requests.with_label_values(&["GET", "none", "4xx"]).get(), 1);
        assert_eq!(
            state
                .metrics
                .latency
                .with_label_values(&["GET", "/health"])
                .get_sample_count(),
            2
        );

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("http_requests_total{"));
        assert!(text.contains("handler=\"/health\""));
        assert!(text.contains("http_request_duration_seconds_bucket{"));
    }
}
