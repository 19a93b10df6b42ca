use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use focus_studio_api::{
    config::AppConfig,
    db::{connect_store, run_migrations},
    processor::{StripeConfig, StripeProcessor},
    routes::build_router,
    services::auth_service::TokenKeys,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,focus_studio_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let store = connect_store(&config.mongodb_uri, &config.database_name).await?;
    run_migrations(&store).await?;

    let stripe = StripeConfig::new(&config.payment_secret_key)
        .with_api_base_url(&config.payment_api_base);
    if !stripe.is_test_mode() {
        tracing::warn!("payment processor is using a live key");
    }
    let processor = StripeProcessor::new(stripe)?;

    let state = AppState::new(
        Arc::new(store),
        Arc::new(processor),
        TokenKeys::new(&config.token_secret),
    );
    let app = build_router(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("Focus Studio is running on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
