mod api;
mod app;
mod auth;
mod config;
mod db;
mod domain;
mod error;
mod logging;
mod middleware;
mod repo;
mod routes;
mod validation;

use anyhow::Result;

use auth::TokenService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting TodoTasks backend"
    );

    // Create database pool and apply pending migrations
    let pool = db::create_pool(&settings).await?;
    db::run_migrations(&pool).await?;

    // JWT issue/verify service
    let tokens = TokenService::new(&settings);

    // Create application state
    let state = app::AppState::new(pool, settings.clone(), tokens);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
