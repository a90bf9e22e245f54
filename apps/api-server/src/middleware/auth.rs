//! Bearer token gate and identity extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;

use rongdhonu_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::{AppError, problem};
use crate::observability::RequestId;
use crate::state::AppState;

/// Verified caller, attached to the request by [`BearerAuth`].
///
/// Use this in handlers behind the gate:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.subject)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.subject,
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &ServiceRequest) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

fn authenticate(req: &ServiceRequest) -> Result<Identity, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let token = bearer_token(req)?;
    state.tokens.validate_token(token).map(Identity::from)
}

/// Middleware that rejects requests without a valid bearer token.
///
/// The wrapped service only runs for authenticated requests.
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = BearerAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthService { service }))
    }
}

pub struct BearerAuthService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(identity) => {
                tracing::debug!(subject = %identity.subject, "Bearer token accepted");
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, path = %req.path(), "Rejected unauthenticated request");

                let mut body = problem(&err);
                if let Some(request_id) = req.extensions().get::<RequestId>() {
                    body = body.with_request_id(request_id.as_str());
                }
                let response = HttpResponse::Unauthorized().json(body);

                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Identity>()
            .cloned()
            .ok_or(AppError::Unauthorized(AuthError::MissingAuth));

        ready(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    use rongdhonu_infra::{Argon2PasswordService, InMemoryPostRepository, JwtConfig, JwtTokenService};

    fn state() -> AppState {
        AppState {
            posts: Arc::new(InMemoryPostRepository::new()),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "gate-secret".to_string(),
                ..JwtConfig::default()
            })),
            passwords: Arc::new(Argon2PasswordService::new()),
            admin: None,
        }
    }

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.subject)
    }

    #[actix_web::test]
    async fn test_gate_passes_identity_through() {
        let state = state();
        let token = state.tokens.generate_token("admin").unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::resource("/me").wrap(BearerAuth).to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "admin");
    }

    #[actix_web::test]
    async fn test_gate_rejects_missing_and_malformed_headers() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(web::resource("/me").wrap(BearerAuth).to(whoami)),
        )
        .await;

        let missing = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, missing).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let basic = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, "Basic YWRtaW46YWRtaW4="))
            .to_request();
        let resp = test::call_service(&app, basic).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let forged = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
            .to_request();
        let resp = test::call_service(&app, forged).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_identity_without_gate_is_unauthorized() {
        let app = test::init_service(App::new().route("/me", web::get().to(whoami))).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
