use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing::info;

use api::{setup_config, setup_db, setup_router};
use app::{
    cache::CacheClient, payment::StripeGateway, persistence::admins::ensure_admin,
    state::AppState,
};
use utils::{create_dev_db, migrate};

/// Builds the application from the environment and serves it until the process stops.
pub async fn run() -> anyhow::Result<()> {
    let config = setup_config()?;

    create_dev_db(&config.db_url).context("creating the development database")?;
    let conn = setup_db(&config.db_url).await?;
    migrate(&conn).await?;

    let cache = CacheClient::connect(&config).await?;
    let mut state = AppState::new(conn, config.clone(), cache);

    match &config.stripe_secret_key {
        Some(key) => state = state.with_payments(Arc::new(StripeGateway::new(key))),
        None => info!("STRIPE_SECRET_KEY not set, payment endpoints are disabled"),
    }

    if let Some(seed) = &config.admin_seed {
        let admin = ensure_admin(&state, seed).await?;
        info!(username = %admin.username, "Admin account ready");
    }

    let listener = tokio::net::TcpListener::bind(config.get_server_url())
        .await
        .with_context(|| format!("binding {}", config.get_server_url()))?;
    info!("Listening on {}", listener.local_addr()?);

    let router = setup_router(state);
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
