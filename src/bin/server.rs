use readmegen::{api, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let state = api::AppState::new(&config)?;

    info!("readmegen server starting");
    info!("Health check: http://{}/health", config.server.bind_addr);

    let app = api::create_app(state);
    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    info!("Server listening on http://{}", config.server.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
