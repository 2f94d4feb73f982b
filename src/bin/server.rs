use tracing::info;

use mister_web::config;
use mister_web::logging;
use mister_web::preview::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    logging::init(&cfg).map_err(|e| anyhow::anyhow!("logging init failed: {}", e))?;
    info!(base_url = %cfg.base_url, "starting preview server");

    let listen = cfg.listen.clone();
    let app = preview::router(AppState::new(cfg)?);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("Server running on http://{}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
