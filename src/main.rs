use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinerec::api::{create_router, AppState};
use cinerec::config::Config;
use cinerec::services::providers::MovieLensSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let source = Box::new(MovieLensSource::new(config.dataset_url.clone()));
    let state = AppState::new(config, source);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "cinerec listening");
    axum::serve(listener, app).await?;

    Ok(())
}
