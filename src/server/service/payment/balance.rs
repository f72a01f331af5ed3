//! Read-through cache of the bot's Telegram Stars balance.

use std::time::Duration;

use chrono::Utc;

use crate::server::{error::Error, model::payment::BalanceCache, store::KeyValueStore};

pub const BALANCE_CACHE_KEY: &str = "stars:balance";

/// How long a fetched balance is served from the cache.
pub const BALANCE_CACHE_TTL: Duration = Duration::from_secs(300);

pub struct BalanceService<'a> {
    store: &'a KeyValueStore,
    telegram_client: &'a telegram::Client,
}

impl<'a> BalanceService<'a> {
    /// Creates a new instance of [`BalanceService`]
    pub fn new(store: &'a KeyValueStore, telegram_client: &'a telegram::Client) -> Self {
        Self {
            store,
            telegram_client,
        }
    }

    /// Star balance, fetched from Telegram when the cached value is missing or older
    /// than [`BALANCE_CACHE_TTL`].
    pub async fn get_balance(&self) -> Result<BalanceCache, Error> {
        let now = Utc::now();

        if let Some(value) = self.store.get(BALANCE_CACHE_KEY).await? {
            match serde_json::from_str::<BalanceCache>(&value) {
                Ok(cache) if cache.expires_at > now => {
                    tracing::debug!(balance = cache.balance, "Serving cached star balance");
                    return Ok(cache);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Ignoring unreadable star balance cache"),
            }
        }

        let balance = self.telegram_client.get_my_star_balance().await?;

        let cache = BalanceCache {
            balance: balance.amount,
            cached_at: now,
            expires_at: now
                + chrono::Duration::from_std(BALANCE_CACHE_TTL)
                    .unwrap_or(chrono::Duration::zero()),
        };

        self.store
            .put(
                BALANCE_CACHE_KEY,
                &serde_json::to_string(&cache)?,
                BALANCE_CACHE_TTL,
            )
            .await?;

        Ok(cache)
    }

    /// Drop the cached balance so the next read goes to Telegram.
    pub async fn clear_balance_cache(&self) -> Result<(), Error> {
        self.store.delete(BALANCE_CACHE_KEY).await
    }
}
