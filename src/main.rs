use jelly_journey::{AppConfig, AppState, PhaseCatalog, load_data, motivation::MotivationClient, router};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();

    let catalog = match &config.phases_path {
        Some(path) => {
            info!("loading phase catalog from {}", path.display());
            PhaseCatalog::from_json_file(path)?
        }
        None => PhaseCatalog::builtin(),
    };
    info!(
        phases = catalog.phases().len(),
        total_days = catalog.total_days(),
        "phase catalog ready"
    );

    fs::create_dir_all(&config.data_dir).await?;
    info!("data directory {}", config.data_dir.display());

    let data = load_data(&config.data_dir, &catalog).await;
    let motivation = MotivationClient::new(config.motivation.clone());
    if config.motivation.api_key.is_none() {
        info!("no GEMINI_API_KEY set, motivation uses the built-in message");
    }
    let state = AppState::new(config.data_dir.clone(), catalog, data, motivation);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
