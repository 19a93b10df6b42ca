use std::env;

use anyhow::{Context, bail};

pub const DEFAULT_DATABASE_NAME: &str = "focusStudio";
pub const DEFAULT_PAYMENT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub token_secret: String,
    pub payment_secret_key: String,
    pub payment_api_base: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongodb_uri = match env::var("MONGODB_URI") {
            Ok(uri) if !uri.trim().is_empty() => uri,
            _ => {
                let user = env::var("DB_USER").context("DB_USER is not set")?;
                let pass = env::var("DB_PASS").context("DB_PASS is not set")?;
                let cluster = env::var("DB_CLUSTER")
                    .unwrap_or_else(|_| "cluster0.mongodb.net".to_string());
                build_mongodb_uri(&user, &pass, &cluster)
            }
        };
        let database_name =
            env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());

        let token_secret =
            env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET is not set")?;
        if token_secret.is_empty() {
            bail!("ACCESS_TOKEN_SECRET must not be empty");
        }
        let payment_secret_key =
            env::var("PAYMENT_SECRET_KEY").context("PAYMENT_SECRET_KEY is not set")?;
        let payment_api_base = env::var("PAYMENT_API_BASE")
            .unwrap_or_else(|_| DEFAULT_PAYMENT_API_BASE.to_string());

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        Ok(Self {
            mongodb_uri,
            database_name,
            token_secret,
            payment_secret_key,
            payment_api_base,
            host,
            port,
        })
    }
}

fn build_mongodb_uri(user: &str, pass: &str, cluster: &str) -> String {
    format!("mongodb+srv://{user}:{pass}@{cluster}/?retryWrites=true&w=majority")
}
