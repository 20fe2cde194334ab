// handler/profile.rs
use std::sync::Arc;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};

use crate::{
    dtos::{ApiResponse, UpdateClientProfileDto, UpdateFreelancerProfileDto},
    error::HttpError,
    extractors::AppJson,
    middleware::{auth, JWTAuthMiddleware},
    AppState,
};

pub fn profile_handler() -> Router {
    let protected = Router::new()
        .route("/client/update", put(update_client_profile))
        .route("/freelancer/update", put(update_freelancer_profile))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/client", get(list_client_profiles))
        .route("/freelancer", get(list_freelancer_profiles))
        .merge(protected)
}

pub async fn update_client_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppJson(body): AppJson<UpdateClientProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .profile_service
        .update_client_profile(&auth.caller, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Client profile updated successfully",
        profile,
    )))
}

pub async fn update_freelancer_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppJson(body): AppJson<UpdateFreelancerProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .profile_service
        .update_freelancer_profile(&auth.caller, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Freelancer profile updated successfully",
        profile,
    )))
}

pub async fn list_client_profiles(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let profiles = app_state.profile_service.list_client_profiles().await?;
    Ok(Json(ApiResponse::data(profiles)))
}

pub async fn list_freelancer_profiles(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let profiles = app_state.profile_service.list_freelancer_profiles().await?;
    Ok(Json(ApiResponse::data(profiles)))
}
