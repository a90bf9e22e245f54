//! Authentication handlers.

use actix_web::{HttpResponse, web};

use rongdhonu_core::ports::AuthError;
use rongdhonu_shared::dto::{AuthResponse, LoginRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(admin) = &state.admin else {
        tracing::warn!("Login attempted but no admin account is configured");
        return Err(AppError::Unauthorized(AuthError::InvalidCredentials));
    };

    if req.username != admin.username {
        return Err(AppError::Unauthorized(AuthError::InvalidCredentials));
    }

    let valid = state.passwords.verify(&req.password, &admin.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized(AuthError::InvalidCredentials));
    }

    let token = state.tokens.generate_token(&admin.username)?;
    tracing::info!(subject = %admin.username, "Issued access token");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    }))
}
