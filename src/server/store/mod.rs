//! Key-value store holding sessions and the star balance cache.
//!
//! Production runs against Redis/Valkey through a `fred` pool; tests and single node
//! development use [`MemoryStore`]. Every operation is atomic on a single key and
//! expiry is enforced by the store itself.

mod memory;

use std::{sync::Arc, time::Duration};

use fred::{prelude::*, types::Expiration};

pub use memory::MemoryStore;

use crate::server::error::Error;

#[derive(Clone)]
pub enum KeyValueStore {
    Redis(Pool),
    Memory(Arc<MemoryStore>),
}

impl KeyValueStore {
    /// Empty in-process store.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::default()))
    }

    /// Value at `key`, `None` if absent or expired.
    pub async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match self {
            Self::Redis(pool) => Ok(pool.get::<Option<String>, _>(key).await?),
            Self::Memory(store) => Ok(store.get(key)),
        }
    }

    /// Store `value` at `key`, replacing any previous value, evicted after `ttl`.
    pub async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), Error> {
        match self {
            Self::Redis(pool) => {
                // Redis rejects EX 0
                let secs = ttl.as_secs().max(1) as i64;
                pool.set::<(), _, _>(key, value, Some(Expiration::EX(secs)), None, false)
                    .await?;
                Ok(())
            }
            Self::Memory(store) => {
                store.put(key, value, ttl);
                Ok(())
            }
        }
    }

    /// Remove `key`; succeeds whether or not it existed.
    pub async fn delete(&self, key: &str) -> Result<(), Error> {
        match self {
            Self::Redis(pool) => {
                pool.del::<i64, _>(key).await?;
                Ok(())
            }
            Self::Memory(store) => {
                store.delete(key);
                Ok(())
            }
        }
    }
}
