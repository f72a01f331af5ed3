use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::Error,
    model::app::{AppState, AuthSettings},
    service::auth::admin::AdminAuthorizer,
    store::KeyValueStore,
};

/// Log filter from `RUST_LOG`, defaulting to `info`.
///
/// Read after the `.env` file is loaded so a `RUST_LOG` set there applies.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build the Telegram Bot API client with the configured token and API URL
pub fn build_telegram_client(config: &Config) -> Result<telegram::Client, Error> {
    let telegram_client = telegram::Client::builder()
        .api_url(&config.telegram_api_url)
        .bot_token(&config.bot_token)
        .build()?;

    Ok(telegram_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis holding sessions and the balance cache
pub async fn connect_to_store(config: &Config) -> Result<KeyValueStore, Error> {
    use fred::prelude::*;

    let redis_config = Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(KeyValueStore::Redis(pool))
}

/// Assemble the state shared by every request handler
pub fn build_app_state(
    config: &Config,
    db: DatabaseConnection,
    telegram_client: telegram::Client,
    store: KeyValueStore,
) -> AppState {
    let admin = AdminAuthorizer::new(config.admin_user_id.as_deref());
    if !admin.is_configured() {
        tracing::warn!("No administrator configured, admin routes are disabled");
    }

    AppState {
        db,
        telegram_client,
        store,
        auth: Arc::new(AuthSettings {
            bot_token: config.bot_token.clone(),
            session_ttl: config.session_ttl,
            init_data_max_age: config.init_data_max_age,
            admin,
            webhook_secret: config.webhook_secret.clone(),
        }),
    }
}
