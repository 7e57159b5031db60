use std::sync::Arc;

use podcast_api::{
    config::Config,
    db::{create_pool, run_migrations, SqliteStore},
    routes::{create_router, AppState},
    services::GeminiClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podcast_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let state = AppState::new(
        Arc::new(SqliteStore::new(pool)),
        Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
        )),
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
