use anyhow::Context;

use marginalia::config::AppConfig;
use marginalia::database;
use marginalia::routes;
use marginalia::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Refuses to start with the development JWT secret in production.
    let config = AppConfig::from_env()?;
    tracing::info!(environment = ?config.environment, "starting marginalia");

    let pool = database::connect(&config.database)
        .await
        .context("database connection failed")?;
    database::migrate(&pool).await.context("migrations failed")?;

    let state = AppState::new(pool, &config);
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
