use std::sync::Arc;

use green_gateway::config::config;
use green_gateway::database::MongoStore;
use green_gateway::routes;
use green_gateway::state::AppState;
use green_gateway::util::version;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGO_URI, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config();
    tracing::info!(
        "starting green gateway {} in {:?} mode",
        version::release_version(),
        config.environment
    );

    let store = MongoStore::connect(&config.database.uri, &config.database.database).await?;
    store.ensure_indexes().await?;

    let state = AppState::new(Arc::new(store));
    let app = routes::app(state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("hosting at {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
