use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::repo::RepoError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("forbidden")]
    Forbidden,
    /// Mutating request without an authenticated identity. Carries the
    /// original target so the action can be resumed after login.
    #[error("authentication required")]
    AuthRequired { next: String },
    #[error("validation failed: {field}")]
    Validation { field: &'static str, message: String },
    #[error("internal error")]
    Internal,
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound => ApiError::NotFound,
            RepoError::Conflict => ApiError::Conflict,
            RepoError::Internal(msg) => {
                log::error!("repository error: {msg}");
                ApiError::Internal
            }
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        use actix_web::http::StatusCode;
        match self {
            ApiError::AuthRequired { next } => HttpResponse::Found()
                .insert_header((
                    "Location",
                    format!("/auth/login?next={}", urlencoding::encode(next)),
                ))
                .finish(),
            ApiError::Validation { field, message } => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "validation",
                    "field": field,
                    "message": message,
                }))
            }
            _ => {
                let status = match self {
                    ApiError::NotFound => StatusCode::NOT_FOUND,
                    ApiError::Conflict => StatusCode::CONFLICT,
                    ApiError::Forbidden => StatusCode::FORBIDDEN,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                HttpResponse::build(status).json(ApiErrorBody { error: self.to_string() })
            }
        }
    }
}
