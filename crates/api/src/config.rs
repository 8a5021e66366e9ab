//! Process configuration, read once from the environment at startup.

/// Runtime settings for the API process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: String,
    /// Listen address in `host:port` form.
    pub bind_addr: String,
    /// Postgres connection string; records live in memory when absent.
    pub database_url: Option<String>,
    /// Credentials for the bootstrap admin, seeded only into an empty store.
    pub admin_email: String,
    pub admin_access_code: String,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to
    /// development defaults for anything unset.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using insecure development secret");
            "dev-secret".to_string()
        });

        Self {
            jwt_secret,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: std::env::var("DATABASE_URL").ok(),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@fieldintel.local".to_string()),
            admin_access_code: std::env::var("ADMIN_ACCESS_CODE")
                .unwrap_or_else(|_| "admin".to_string()),
        }
    }
}
