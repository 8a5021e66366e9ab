use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use fieldintel_auth::{NewUser, TokenCodec, User};
use fieldintel_infra::{
    ensure_schema, InMemoryStore, InformationStore, PostgresInformationStore, PostgresUserStore,
    StoreRoleResolver, UserStore,
};

use crate::config::AppConfig;

/// Shared handles the request handlers work against.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub informations: Arc<dyn InformationStore>,
    pub resolver: Arc<StoreRoleResolver<Arc<dyn UserStore>>>,
    pub tokens: Arc<TokenCodec>,
}

impl AppServices {
    pub fn new(
        users: Arc<dyn UserStore>,
        informations: Arc<dyn InformationStore>,
        tokens: TokenCodec,
    ) -> Self {
        let resolver = Arc::new(StoreRoleResolver::new(users.clone()));
        Self {
            users,
            informations,
            resolver,
            tokens: Arc::new(tokens),
        }
    }
}

/// Wire up storage from configuration: Postgres when `DATABASE_URL` is set,
/// the in-memory store otherwise (dev/test).
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let tokens = TokenCodec::new(config.jwt_secret.as_bytes());

    let services = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
            ensure_schema(&pool).await?;

            let users: Arc<dyn UserStore> = Arc::new(PostgresUserStore::new(pool.clone()));
            let informations: Arc<dyn InformationStore> =
                Arc::new(PostgresInformationStore::new(pool));
            AppServices::new(users, informations, tokens)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            let store = Arc::new(InMemoryStore::new());
            let users: Arc<dyn UserStore> = store.clone();
            let informations: Arc<dyn InformationStore> = store;
            AppServices::new(users, informations, tokens)
        }
    };

    seed_admin(&services, config).await;

    Ok(services)
}

/// Create the bootstrap admin when the user table is empty, so a fresh
/// deployment has an account that can log in and manage the rest.
async fn seed_admin(services: &AppServices, config: &AppConfig) {
    let existing = match services.users.list().await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!(error = %e, "admin seeding skipped, user listing failed");
            return;
        }
    };
    if !existing.is_empty() {
        return;
    }

    let admin = match User::create(
        NewUser {
            email: Some(config.admin_email.clone()),
            access_code: Some(config.admin_access_code.clone()),
            role: Some("A".to_string()),
            view: None,
        },
        chrono::Utc::now(),
    ) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "admin seeding skipped, configured credentials invalid");
            return;
        }
    };

    match services.users.insert(&admin).await {
        Ok(()) => tracing::info!(email = %admin.email, "seeded bootstrap admin account"),
        Err(e) => tracing::warn!(error = %e, "admin seeding failed"),
    }
}
