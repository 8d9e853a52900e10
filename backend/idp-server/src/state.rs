use crate::ServerResult;

use idp_accounts::{AccountService, ReconcilerConfig};
use idp_auth::TokenIssuer;
use idp_config::Config;
use idp_db::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use log::info;
use sqlx::SqlitePool;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub accounts: AccountService,
}

impl AppState {
    /// Wire the account services over an already-migrated pool.
    pub fn new(pool: SqlitePool, tokens: TokenIssuer, reconciler: ReconcilerConfig) -> Self {
        let store = Arc::new(UserRepository::new(pool.clone()));
        let accounts = AccountService::new(store, Arc::new(tokens), reconciler);

        Self { pool, accounts }
    }

    /// Open the database and build every service from a validated config.
    pub async fn from_config(config: &Config) -> ServerResult<Self> {
        let database_path = config.database_path()?;
        info!("Connecting to database: {}", database_path.display());

        let pool = idp_db::connect(
            &database_path,
            config.database.max_connections,
            Duration::from_secs(config.database.busy_timeout_secs),
        )
        .await?;

        let tokens = TokenIssuer::from_config(&config.auth)?;

        Ok(Self::new(
            pool,
            tokens,
            ReconcilerConfig::from(&config.provisioning),
        ))
    }
}
