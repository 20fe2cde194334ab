// handler/jobs.rs
use std::sync::Arc;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    dtos::*,
    error::HttpError,
    extractors::{AppJson, AppPath, JsonOrDefault},
    middleware::{auth, optional_auth, JWTAuthMiddleware},
    AppState,
};

pub fn jobs_handler() -> Router {
    let public = Router::new().route("/", get(list_jobs));

    let optionally_authenticated = Router::new()
        .route("/:id", get(get_job))
        .layer(middleware::from_fn(optional_auth));

    let protected = Router::new()
        .route("/applied", get(list_applied_jobs))
        .route("/post", post(create_job))
        .route("/edit/:id", put(update_job))
        .route("/delete/:id", delete(delete_job))
        .route("/:id/apply", put(apply_to_job))
        .route("/:id/applicants", get(list_applicants))
        .route("/:id/applicants/:applicant_id/decision", patch(decide_application))
        .route("/:id/status", put(set_job_status))
        .layer(middleware::from_fn(auth));

    Router::new()
        .merge(public)
        .merge(optionally_authenticated)
        .merge(protected)
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppJson(body): AppJson<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state.job_service.create_job(&auth.caller, body).await?;

    Ok(Json(ApiResponse::success("Job posted successfully", job)))
}

pub async fn list_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.job_service.list_jobs().await?;

    Ok(Json(ApiResponse::data(jobs)))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    auth: Option<Extension<JWTAuthMiddleware>>,
    AppPath(job_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let caller = auth.as_ref().map(|Extension(auth)| &auth.caller);
    let job = app_state.job_service.get_job(caller, job_id).await?;

    Ok(Json(ApiResponse::data(job)))
}

pub async fn update_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppPath(job_id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .job_service
        .update_job(&auth.caller, job_id, body)
        .await?;

    Ok(Json(ApiResponse::success("Job updated successfully", job)))
}

pub async fn delete_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppPath(job_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.job_service.delete_job(&auth.caller, job_id).await?;

    Ok(Json(ApiResponse::message("Job deleted successfully")))
}

pub async fn set_job_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppPath(job_id): AppPath<Uuid>,
    AppJson(body): AppJson<SetJobStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .job_service
        .set_job_status(&auth.caller, job_id, &body.status)
        .await?;

    Ok(Json(ApiResponse::success("Job status updated", result)))
}

pub async fn apply_to_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppPath(job_id): AppPath<Uuid>,
    JsonOrDefault(body): JsonOrDefault<ApplyDto>,
) -> Result<impl IntoResponse, HttpError> {
    let application = app_state
        .application_service
        .apply(&auth.caller, job_id, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Application submitted successfully",
        application,
    )))
}

pub async fn list_applicants(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppPath(job_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let applicants = app_state
        .application_service
        .list_applicants(&auth.caller, job_id)
        .await?;

    Ok(Json(ApiResponse::data(applicants)))
}

pub async fn decide_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    AppPath((job_id, application_id)): AppPath<(Uuid, Uuid)>,
    AppJson(body): AppJson<DecisionDto>,
) -> Result<impl IntoResponse, HttpError> {
    let application = app_state
        .application_service
        .decide(&auth.caller, job_id, application_id, &body.decision)
        .await?;

    Ok(Json(ApiResponse::success(
        &format!("Application {}", application.status.to_str()),
        application,
    )))
}

pub async fn list_applied_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .application_service
        .list_applied_jobs(&auth.caller)
        .await?;

    Ok(Json(ApiResponse::data(jobs)))
}
