use actix_web::{post, web, HttpResponse};
use autoroute_llm::{chat_prompt, GenerateRequest};
use autoroute_router::Route;
use autoroute_vector::SearchResult;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

const NO_MATCH: &str = "No matching FAQ entries found.";

/// Route a user message to FAQ search or the chat model
#[post("/chat")]
pub async fn chat(
    req: web::Json<ChatRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let decision = state.router.route(&req.text);
    info!("Chat request routed to {} (rule {:?})", decision.component, decision.rule);

    let response = match decision.component {
        Route::VectorSearch => {
            let results = if state.vector_search.is_empty().await {
                Vec::new()
            } else {
                state
                    .vector_search
                    .search(&req.text, state.config.default_top_k)
                    .await?
            };

            ChatResponse {
                response: format_results(&results),
                route: Route::VectorSearch,
                results: Some(results),
            }
        }
        Route::LlmChat => {
            let request = GenerateRequest::new(&state.config.llm_model, chat_prompt(&req.text));
            let reply = state.llm.generate(request).await?;

            ChatResponse {
                response: reply.trim().to_string(),
                route: Route::LlmChat,
                results: None,
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_MATCH.to_string();
    }

    let mut out = String::from("Search results from vector DB:");
    for (rank, result) in results.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", rank + 1, result.document));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::configure;
    use crate::test_support::{faq_docs, state_with, CHAT_REPLY};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_faq_question_searches_store() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "text": "FAQ: how do I reset my password?" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["route"], "vector_search");
        assert_eq!(body["results"][0]["document"], "How to reset my password?");
        assert_eq!(body["results"][0]["distance"], 0.0);
        // default_top_k is 3 and the store holds 3 documents
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
        assert!(body["response"]
            .as_str()
            .unwrap()
            .starts_with("Search results from vector DB:\n1. How to reset my password?"));
    }

    #[actix_web::test]
    async fn test_faq_on_empty_store() {
        let state = state_with(Vec::new(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "text": "Where can I find the FAQ page?" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["route"], "vector_search");
        assert_eq!(body["response"], NO_MATCH);
        assert_eq!(body["results"], json!([]));
    }

    #[actix_web::test]
    async fn test_other_text_goes_to_chat_model() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "text": "Hello" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["route"], "llm_chat");
        assert_eq!(body["response"], CHAT_REPLY);
        assert!(body.get("results").is_none());
    }

    #[actix_web::test]
    async fn test_blank_text_goes_to_chat_model() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        for text in ["", "   "] {
            let req = test::TestRequest::post()
                .uri("/chat")
                .set_json(json!({ "text": text }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "text={:?}", text);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["route"], "llm_chat");
            assert_eq!(body["response"], CHAT_REPLY);
        }
    }

    #[actix_web::test]
    async fn test_malformed_body_rejected_as_json() {
        let state = state_with(faq_docs(), false).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "message": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_model_outage_is_service_unavailable() {
        let state = state_with(faq_docs(), true).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        for text in ["hello", "faq about passwords"] {
            let req = test::TestRequest::post()
                .uri("/chat")
                .set_json(json!({ "text": text }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "text={}", text);
        }
    }

    #[actix_web::test]
    async fn test_format_results() {
        assert_eq!(format_results(&[]), NO_MATCH);
        let results = vec![
            SearchResult::new(1, "B", 0.0),
            SearchResult::new(0, "A", 1.5),
        ];
        assert_eq!(format_results(&results), "Search results from vector DB:\n1. B\n2. A");
    }
}
