use actix_web::{delete, post, web, HttpResponse};
use autoroute_common::text::is_blank;
use autoroute_common::AutoRouteError;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{AddDocumentsRequest, AddDocumentsResponse, AddEmbeddingsRequest, ClearResponse};

/// Embed documents with the configured model and append them
#[post("/documents")]
pub async fn add_documents(
    req: web::Json<AddDocumentsRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let documents = req.into_inner().documents;
    if let Some(i) = documents.iter().position(|d| is_blank(d)) {
        return Err(AutoRouteError::invalid_input(format!("Document {} is empty", i)).into());
    }

    let added = documents.len();
    let total = state.vector_search.add_documents(documents).await?;

    Ok(HttpResponse::Ok().json(AddDocumentsResponse { added, total }))
}

/// Append documents with caller-supplied embeddings
#[post("/documents/embeddings")]
pub async fn add_embeddings(
    req: web::Json<AddEmbeddingsRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let AddEmbeddingsRequest {
        embeddings,
        documents,
    } = req.into_inner();

    let added = documents.len();
    let total = state
        .vector_search
        .add_embeddings(embeddings, documents)
        .await?;

    Ok(HttpResponse::Ok().json(AddDocumentsResponse { added, total }))
}

/// Drop every document from the index
#[delete("/documents")]
pub async fn clear_documents(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let removed = state.vector_search.clear().await?;
    Ok(HttpResponse::Ok().json(ClearResponse { removed }))
}
