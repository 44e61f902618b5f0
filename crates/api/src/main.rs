use std::sync::Arc;

use anyhow::Context;

use stockflow_api::app::{self, services::AppServices};
use stockflow_infra::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    stockflow_observability::init(config.log_format);

    let bind_addr = config.bind_addr;
    let services = Arc::new(AppServices::in_memory(config));
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
