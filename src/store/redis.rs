//! Redis Store Module
//!
//! `StoreClient` backed by a remote Redis server over a multiplexed async
//! connection. Every command is bounded by the configured store timeout and
//! failures are reported as they happen; nothing is retried here.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tracing::{debug, info};

use super::{StoreClient, StoreResult};
use crate::config::Config;
use crate::error::StoreError;

// == Redis Store ==
/// Redis-backed store.
///
/// The multiplexed connection is cheap to clone; each command runs on its own
/// clone so concurrent requests pipeline over one socket.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    timeout: Duration,
    address: String,
}

impl RedisStore {
    /// Connects to the Redis server described by `config`.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let timeout = config.store_timeout();
        let address = format!("{}:{}", config.redis_host, config.redis_port);

        let client = Client::open(connection_info(config))
            .map_err(|e| StoreError::Connection(format!("invalid Redis settings: {}", e)))?;

        let conn = match tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
            .await
        {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => {
                return Err(StoreError::Connection(format!(
                    "failed to connect to Redis at {}: {}",
                    address, e
                )))
            }
            Err(_) => {
                return Err(StoreError::Timeout {
                    command: "CONNECT",
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        };

        info!("Redis connected at {}", address);

        Ok(Self {
            conn,
            timeout,
            address,
        })
    }

    /// Address of the Redis server, `host:port`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Runs one command under the store timeout, mapping its failure.
    async fn run<T, F>(&self, command: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = redis::RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(StoreError::Command {
                command,
                message: e.to_string(),
            }),
            Err(_) => Err(StoreError::Timeout {
                command,
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

/// Builds Redis connection settings from process configuration.
fn connection_info(config: &Config) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.redis_host.clone(), config.redis_port),
        redis: RedisConnectionInfo {
            db: config.redis_db,
            password: config.redis_password.clone(),
            ..Default::default()
        },
    }
}

#[async_trait]
impl StoreClient for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        self.run("GET", async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        match ttl_secs {
            Some(ttl) => {
                self.run("SETEX", async move {
                    conn.set_ex::<_, _, ()>(key, value, ttl).await
                })
                .await
            }
            None => {
                self.run("SET", async move { conn.set::<_, _, ()>(key, value).await })
                    .await
            }
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        self.run("DEL", async move { conn.del::<_, u64>(key).await })
            .await
    }

    async fn size(&self) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        let size = self
            .run("DBSIZE", async move {
                redis::cmd("DBSIZE")
                    .query_async::<u64>(&mut conn)
                    .await
            })
            .await?;
        debug!("Redis DBSIZE = {}", size);
        Ok(size)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .field("timeout", &self.timeout)
            .finish()
    }
}
