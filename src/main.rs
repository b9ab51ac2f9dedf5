mod agent;
mod config;
mod handlers;
mod routes;
mod state;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the real environment
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("thecatcher_backend=debug,tower_http=debug")),
        )
        .init();

    if let Some(path) = dotenv_path {
        info!("Loaded environment from: {}", path.display());
    }

    let config_paths = Config::search_paths(std::env::var("CONFIG_PATH").ok());
    let mut config = Config::discover(&config_paths)?;
    config.apply_env_overrides();

    let host = config.server.host.clone();
    let port = config.server.port;

    // Initialize app state
    let app_state = AppState::new(config)?;
    let app = routes::build_app(app_state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
