mod config;
mod db;
mod dtos;
mod error;
mod extractors;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use config::Config;
use db::{DBClient, Store};
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use service::{
    account_service::AccountService, application_service::ApplicationService,
    identity::IdentityService, job_service::JobService, profile_service::ProfileService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub identity_service: Arc<IdentityService>,
    pub account_service: Arc<AccountService>,
    pub profile_service: Arc<ProfileService>,
    pub job_service: Arc<JobService>,
    pub application_service: Arc<ApplicationService>,
}

impl AppState {
    pub fn new(db_client: Arc<dyn Store>, config: Config) -> Self {
        let profile_service = Arc::new(ProfileService::new(db_client.clone()));

        let identity_service = Arc::new(IdentityService::new(db_client.clone()));
        let account_service = Arc::new(AccountService::new(
            db_client.clone(),
            config.jwt_secret.clone(),
            config.jwt_maxage,
        ));
        let job_service = Arc::new(JobService::new(db_client.clone(), profile_service.clone()));
        let application_service =
            Arc::new(ApplicationService::new(db_client, profile_service.clone()));

        Self {
            env: config,
            identity_service,
            account_service,
            profile_service,
            job_service,
            application_service,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let log_level = std::env::var("RUST_LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::DEBUG);

    tracing_subscriber::fmt().with_max_level(log_level).init();

    let config = Config::init()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("🔥 Failed to connect to the database")?;

    tracing::info!("✅ Connection to the database is successful!");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let db_client = Arc::new(DBClient::new(pool));

    let allowed_origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("CORS_ORIGINS contains an invalid origin")?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([
            AUTHORIZATION,
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static("token"),
        ])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = Arc::new(AppState::new(db_client.clone(), config.clone()));

    let app = create_router(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;

    tracing::info!("🚀 Server is running on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_client.close().await;
    tracing::info!("👋 Database pool closed, bye");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
