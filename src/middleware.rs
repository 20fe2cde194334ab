// middleware.rs
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::IntoResponse,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    error::{ErrorMessage, HttpError},
    service::identity::Caller,
    utils::token,
    AppState,
};

#[derive(Debug, Clone)]
pub struct JWTAuthMiddleware {
    pub caller: Caller,
}

/// Token from the `token` cookie, an `Authorization: Bearer` header or a raw
/// `token` header, in that order.
fn extract_token(cookie_jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_owned())
        })
        .or_else(|| {
            headers
                .get("token")
                .and_then(|value| value.to_str().ok())
                .map(|token| token.trim().to_owned())
        })
        .filter(|token| !token.is_empty())
}

async fn authenticate(app_state: &AppState, token: String) -> Result<Caller, HttpError> {
    let subject = token::decode_token(token, app_state.env.jwt_secret.as_bytes())?;

    let user_id = Uuid::parse_str(&subject)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let caller = app_state.identity_service.resolve_caller(user_id).await?;
    Ok(caller)
}

pub async fn auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = extract_token(&cookie_jar, req.headers())
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string()))?;

    let caller = authenticate(&app_state, token).await?;

    req.extensions_mut().insert(JWTAuthMiddleware { caller });

    Ok(next.run(req).await)
}

/// Like `auth`, but lets anonymous requests through. A bad token is treated
/// as no token.
pub async fn optional_auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    if let Some(token) = extract_token(&cookie_jar, req.headers()) {
        match authenticate(&app_state, token).await {
            Ok(caller) => {
                req.extensions_mut().insert(JWTAuthMiddleware { caller });
            }
            Err(err) if err.status.is_server_error() => return Err(err),
            Err(err) => {
                tracing::debug!("continuing anonymously: {}", err.message);
            }
        }
    }

    Ok(next.run(req).await)
}
