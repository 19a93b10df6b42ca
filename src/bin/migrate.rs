use focus_studio_api::{
    config::AppConfig,
    db::{connect_store, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let config = AppConfig::from_env()?;
    let store = connect_store(&config.mongodb_uri, &config.database_name).await?;
    run_migrations(&store).await?;
    println!("Indexes ready on {}", config.database_name);
    Ok(())
}
