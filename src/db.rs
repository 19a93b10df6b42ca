use std::time::Duration;

use anyhow::Result;
use mongodb::{
    Client,
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
};

use crate::store::MongoStore;

/// Create a MongoDB client pinned to the Stable API v1.
pub async fn create_client(uri: &str) -> Result<Client> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("focus-studio-api".to_string());
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    options.max_pool_size = Some(20);
    options.connect_timeout = Some(Duration::from_secs(5));
    options.server_selection_timeout = Some(Duration::from_secs(5));

    let client = Client::with_options(options)?;
    Ok(client)
}

/// Connect to `database_name` and confirm the deployment answers a ping.
pub async fn connect_store(uri: &str, database_name: &str) -> Result<MongoStore> {
    let client = create_client(uri).await?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;
    tracing::info!(database = %database_name, "pinged deployment, MongoDB connection ready");
    Ok(MongoStore::new(client.database(database_name)))
}

/// Index setup is the only schema work a document store needs.
pub async fn run_migrations(store: &MongoStore) -> Result<()> {
    store.ensure_indexes().await?;
    Ok(())
}
