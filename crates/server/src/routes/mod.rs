use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use crate::types::ErrorResponse;

mod chat;
mod documents;
mod search;
mod system;

/// Register every endpoint and JSON/query extractor error handling
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = bad_request(err.to_string());
        InternalError::from_response(err, body).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let body = bad_request(err.to_string());
        InternalError::from_response(err, body).into()
    }))
    .service(system::health)
    .service(system::metrics)
    .service(chat::chat)
    .service(search::search)
    .service(search::search_vector)
    .service(search::search_stats)
    .service(documents::add_documents)
    .service(documents::add_embeddings)
    .service(documents::clear_documents);
}

fn bad_request(error: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse { error })
}
