//! Error handling - flat 400 responses for handler failures.
//!
//! Every failure a handler can hit (bad input, missing post, store errors)
//! answers `400` with the JSON string `"Error: <message>"`. Authentication
//! failures are the exception and answer `401` with an RFC 7807 body.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use rongdhonu_core::error::{DomainError, RepoError};
use rongdhonu_core::ports::AuthError;
use rongdhonu_shared::ErrorResponse;
use std::fmt;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or rejected bearer credential, or failed login.
    Unauthorized(AuthError),
    /// Required field missing or empty.
    Validation(String),
    /// The addressed post does not exist.
    NotFound(String),
    /// Malformed request (bad id, body or query string).
    BadRequest(String),
    /// Connectivity or query failure in the post store.
    Store(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized(err) => write!(f, "{}", err),
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Store(msg) => write!(f, "{}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(AuthError::HashingError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(err) => {
                tracing::warn!(error = %err, "Authentication failed");
                HttpResponse::build(self.status_code()).json(problem(err))
            }
            AppError::Store(msg) => {
                tracing::error!(error = %msg, "Post store error");
                HttpResponse::BadRequest().json(format!("Error: {}", self))
            }
            _ => {
                tracing::warn!(error = %self, "Request failed");
                HttpResponse::BadRequest().json(format!("Error: {}", self))
            }
        }
    }
}

/// RFC 7807 body for an authentication failure.
pub fn problem(err: &AuthError) -> ErrorResponse {
    match err {
        AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
            .with_detail("Your authentication token has expired. Please login again."),
        AuthError::InvalidToken(msg) => {
            ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
        }
        AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
            .with_detail("Please provide a valid Bearer token in the Authorization header."),
        AuthError::InvalidCredentials => ErrorResponse::invalid_credentials(),
        AuthError::HashingError(_) => ErrorResponse::login_unavailable(),
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound(err.to_string()),
            RepoError::Validation(err) => err.into(),
            RepoError::Connection(msg) => {
                AppError::Store(format!("Database connection failed: {}", msg))
            }
            RepoError::Query(msg) => AppError::Store(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(err)
    }
}

/// Route extractor failures (body, query string, path) into the 400 channel.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    }));
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
