use fred::prelude::*;

use crate::TestError;

/// Connection to a live Redis/Valkey instance at `redis://127.0.0.1:6379`.
///
/// Only used by tests behind the `redis-test` feature.
pub struct RedisTest {
    pub redis_pool: Pool,
}

impl RedisTest {
    pub async fn new() -> Result<Self, TestError> {
        let redis_config = Config::from_url("redis://127.0.0.1:6379")?;
        let redis_pool = Pool::new(redis_config, None, None, None, 2)?;
        redis_pool.init().await?;

        Ok(RedisTest { redis_pool })
    }
}
