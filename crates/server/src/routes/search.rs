use actix_web::{get, post, web, HttpResponse};
use autoroute_common::text::is_blank;
use autoroute_common::AutoRouteError;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{SearchQuery, SearchResponse, VectorSearchRequest};

#[get("/search")]
pub async fn search(
    query: web::Query<SearchQuery>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    if is_blank(&query.q) {
        return Err(AutoRouteError::invalid_input("Query cannot be empty").into());
    }

    let top_k = query.top_k.unwrap_or(state.config.default_top_k);
    let results = state.vector_search.search(&query.q, top_k).await?;

    Ok(HttpResponse::Ok().json(SearchResponse::new(Some(query.q.clone()), results)))
}

#[post("/search/vector")]
pub async fn search_vector(
    req: web::Json<VectorSearchRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let top_k = req.top_k.unwrap_or(state.config.default_top_k);
    let results = state.vector_search.search_vector(&req.vector, top_k).await?;

    Ok(HttpResponse::Ok().json(SearchResponse::new(None, results)))
}

#[get("/search/stats")]
pub async fn search_stats(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.vector_search.stats().await)
}

#[cfg(test)]
mod tests {
    use crate::routes::configure;
    use crate::test_support::{faq_docs, state_with};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_text_search() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/search?q=forgot%20password&top_k=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["query"], "forgot password");
        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][0]["document"], "How to reset my password?");
        assert_eq!(body["results"][1]["document"], "How to contact customer support?");
        assert_eq!(body["results"][1]["distance"], 0.5);
    }

    #[actix_web::test]
    async fn test_empty_query_rejected() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/search?q=%20").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/search").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_vector_search_scenario() {
        let docs = vec![
            (vec![0.0, 0.0], "A"),
            (vec![10.0, 10.0], "B"),
            (vec![1.0, 1.0], "C"),
        ];
        let state = state_with(docs, false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/search/vector")
            .set_json(json!({ "vector": [0.0, 0.0], "top_k": 2 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert!(body.get("query").is_none());
        assert_eq!(
            body["results"],
            json!([
                { "position": 0, "document": "A", "distance": 0.0 },
                { "position": 2, "document": "C", "distance": 2.0 }
            ])
        );
    }

    #[actix_web::test]
    async fn test_vector_search_clamps_k() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/search/vector")
            .set_json(json!({ "vector": [0.2, 0.9], "top_k": 100 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 3);
    }

    #[actix_web::test]
    async fn test_vector_dimension_mismatch() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/search/vector")
            .set_json(json!({ "vector": [0.0, 0.0, 0.0] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "Invalid input: expected vector of dimension 2, got 3"
        );
    }

    #[actix_web::test]
    async fn test_stats() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/search/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["documents"], 3);
        assert_eq!(body["dimension"], 2);
        assert_eq!(body["embedding_model"], "fake-embed");
        assert!(body["updated_at"].is_string());
    }
}
