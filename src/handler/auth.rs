// handler/auth.rs
use std::sync::Arc;

use axum::{http::header, response::IntoResponse, routing::post, Extension, Json, Router};
use axum_extra::extract::cookie::Cookie;

use crate::{
    dtos::{ApiResponse, FilterUserDto, LoginUserDto, RegisterUserDto, UserLoginResponseDto},
    error::HttpError,
    extractors::AppJson,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    AppJson(body): AppJson<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    let session = app_state.account_service.register(body).await?;

    Ok(Json(ApiResponse::success(
        "User registered successfully",
        UserLoginResponseDto {
            user: FilterUserDto::filter_user(&session.user),
            token: session.token,
        },
    )))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    AppJson(body): AppJson<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    let session = app_state.account_service.login(body).await?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", session.token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let cookie_header = cookie
        .to_string()
        .parse::<header::HeaderValue>()
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut response = Json(ApiResponse::success(
        "Login successful",
        UserLoginResponseDto {
            user: FilterUserDto::filter_user(&session.user),
            token: session.token,
        },
    ))
    .into_response();
    response
        .headers_mut()
        .append(header::SET_COOKIE, cookie_header);

    Ok(response)
}
