use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub payments: PaymentConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Origins allowed by CORS. Empty means "allow any origin".
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub db_name: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub token_secret: String,
    pub token_expiry_hours: u64,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub stripe_secret_key: String,
}

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DB_NAME: &str = "techhiveDB";
const DEFAULT_TOKEN_EXPIRY_HOURS: u64 = 1;
const DEV_TOKEN_SECRET: &str = "techhive-dev-secret";

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string());
        let db_name = env::var("TECHHIVE_DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());

        let token_secret = env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("ACCESS_TOKEN_SECRET is not set, falling back to the development secret");
            DEV_TOKEN_SECRET.to_string()
        });

        let token_expiry_hours = env::var("TOKEN_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_HOURS);

        let stripe_secret_key = env::var("STRIPE_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("STRIPE_SECRET_KEY is not set, payment intent creation will fail");
            String::new()
        });

        Self {
            server: ServerConfig { port, cors_allowed_origins },
            database: DatabaseConfig { uri, db_name },
            security: SecurityConfig { token_secret, token_expiry_hours },
            payments: PaymentConfig { stripe_secret_key },
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
