use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use evalboard_server::build_router;
use evalboard_server::config::AppConfig;
use evalboard_server::directory::StaticCampusDirectory;
use evalboard_server::state::AppState;
use evalboard_server::store::Store;
use evalboard_server::store::filesystem::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let backend = Arc::new(JsonFileStore::new(&config.storage.path));
    let store = Store::open(backend)
        .await
        .context("Failed to open document store")?;
    info!(path = %config.storage.path.display(), "Document store ready");

    let state = AppState {
        store: Arc::new(store),
        campuses: Arc::new(StaticCampusDirectory::from_config(&config.auth)),
        config: config.clone(),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
