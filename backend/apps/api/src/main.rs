//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{PgUserRepository, ProvisionAdminUseCase, ProvisionOutcome};
use media::UploadPipeline;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,media=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Development admin provisioning
    // Errors here should not prevent server startup
    if let Some(provision) = &config.provision {
        let use_case = ProvisionAdminUseCase::new(Arc::new(PgUserRepository::new(pool.clone())));
        match use_case.execute(provision).await {
            Ok(ProvisionOutcome::Created(user_id)) => {
                tracing::info!(%user_id, "Development admin provisioned");
            }
            Ok(ProvisionOutcome::AlreadyPresent) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Admin provisioning failed, continuing anyway");
            }
        }
    }

    let pipeline = Arc::new(UploadPipeline::new(config.media.clone())?);
    tracing::info!(
        provider = pipeline.provider().code(),
        uploads_dir = %config.media.uploads_dir.display(),
        "Upload storage ready"
    );

    let auth_config = Arc::new(config.auth.clone());

    // Build router
    let app = routes::app(
        routes::api_routes(pool, auth_config, pipeline),
        &config.media.uploads_dir,
        &config.frontend_origins,
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
