use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use autoroute_common::AutoRouteError;
use std::fmt;
use tracing::{debug, error};

use crate::types::ErrorResponse;

/// HTTP-facing wrapper around [`AutoRouteError`]
#[derive(Debug)]
pub struct ApiError(pub AutoRouteError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AutoRouteError> for ApiError {
    fn from(err: AutoRouteError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if self.0.is_client_error() {
            debug!("Request rejected: {}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.0.to_string(),
        })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
