use std::{env, time::Duration};

const DEFAULT_PORT: u16 = 4242;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
    pub stripe_api_base: String,
    /// Bearer secret for the admin order listing. `None` locks the endpoint.
    pub admin_password: Option<String>,
    pub public_base_url: String,
    pub static_dir: String,
    pub line_items_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY is not set"))?;
        let stripe_webhook_secret = env::var("STRIPE_WEBHOOK_SECRET")
            .map_err(|_| anyhow::anyhow!("STRIPE_WEBHOOK_SECRET is not set"))?;
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://orders.db".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{port}"));
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());
        let stripe_api_base = env::var("STRIPE_API_BASE")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let line_items_timeout = env::var("LINE_ITEMS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Ok(Self {
            database_url,
            host,
            port,
            stripe_secret_key,
            stripe_webhook_secret,
            stripe_api_base,
            admin_password,
            public_base_url,
            static_dir,
            line_items_timeout,
        })
    }
}
