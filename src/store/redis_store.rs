//! Redis Store Module
//!
//! Blocking client for an external Redis server.

use std::sync::{Mutex, MutexGuard};

use redis::{Client, Connection};
use tracing::{info, trace};

use crate::error::{StoreError, StoreResult};
use crate::store::StoreClient;

// == Redis Store ==
/// One blocking Redis connection shared behind a mutex.
///
/// Commands are issued one round-trip at a time; nothing is pipelined.
pub struct RedisStore {
    conn: Mutex<Connection>,
}

impl RedisStore {
    // == Constructor ==
    /// Connects to the Redis server at `url`.
    ///
    /// # Arguments
    /// * `url` - Connection URL, e.g. `redis://127.0.0.1:6379/0`
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)?;
        let conn = client.get_connection()?;
        info!("Connected to Redis at {}", url);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Internal("redis connection lock poisoned".to_string()))
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl StoreClient for RedisStore {
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        trace!(command = "SET", key, "redis store");
        let mut conn = self.conn()?;
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query::<()>(&mut *conn)?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        trace!(command = "GET", key, "redis store");
        let mut conn = self.conn()?;
        Ok(redis::cmd("GET").arg(key).query(&mut *conn)?)
    }

    fn incr(&self, key: &str) -> StoreResult<i64> {
        trace!(command = "INCR", key, "redis store");
        let mut conn = self.conn()?;
        Ok(redis::cmd("INCR").arg(key).query(&mut *conn)?)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> StoreResult<usize> {
        trace!(command = "RPUSH", key, "redis store");
        let mut conn = self.conn()?;
        Ok(redis::cmd("RPUSH").arg(key).arg(value).query(&mut *conn)?)
    }

    fn lrange(&self, key: &str, start: isize, end: isize) -> StoreResult<Vec<Vec<u8>>> {
        trace!(command = "LRANGE", key, start, end, "redis store");
        let mut conn = self.conn()?;
        Ok(redis::cmd("LRANGE")
            .arg(key)
            .arg(start)
            .arg(end)
            .query(&mut *conn)?)
    }

    fn flush_all(&self) -> StoreResult<()> {
        trace!(command = "FLUSHDB", "redis store");
        let mut conn = self.conn()?;
        redis::cmd("FLUSHDB").query::<()>(&mut *conn)?;
        Ok(())
    }
}
