use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::info;

use crate::infrastructure::{
    config::Config,
    db::{self, SqlitePool},
    seed,
    storage::{self, KeyValueStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub kv: Arc<dyn KeyValueStore>,
    pub order_ids: Arc<OrderIdGenerator>,
}

impl AppState {
    pub fn new(config: Arc<Config>, pool: SqlitePool, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            config,
            pool,
            kv,
            order_ids: Arc::new(OrderIdGenerator::default()),
        }
    }

    /// Opens the database, creates the tables and loads sample data when
    /// seeding is enabled.
    pub async fn initialize(config: Arc<Config>) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database).await?;
        db::create_schema(&pool).await?;
        let kv = storage::build_kv_store();

        if config.seed.enabled {
            seed::seed(&pool, kv.as_ref(), &config.seed).await?;
        } else {
            info!("sample data disabled; starting with empty tables");
        }

        Ok(Self::new(config, pool, kv))
    }
}

/// Hands out toy order ids derived from the wall clock in milliseconds.
///
/// Two orders created within the same millisecond get consecutive values
/// instead of the same one.
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    last: Mutex<i64>,
}

impl OrderIdGenerator {
    pub fn next_id(&self) -> String {
        self.next_after(Utc::now().timestamp_millis()).to_string()
    }

    fn next_after(&self, now_millis: i64) -> i64 {
        let mut last = self.last.lock();
        let next = now_millis.max(*last + 1);
        *last = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_the_clock() {
        let ids = OrderIdGenerator::default();
        assert_eq!(ids.next_after(1_700_000_000_000), 1_700_000_000_000);
        assert_eq!(ids.next_after(1_700_000_000_500), 1_700_000_000_500);
    }

    #[test]
    fn ids_never_repeat_within_a_millisecond() {
        let ids = OrderIdGenerator::default();
        let first = ids.next_after(1_700_000_000_000);
        let second = ids.next_after(1_700_000_000_000);
        let third = ids.next_after(1_699_999_999_999);
        assert_eq!(second, first + 1);
        assert_eq!(third, first + 2);
    }

    #[test]
    fn next_id_is_a_millisecond_timestamp_string() {
        let before = Utc::now().timestamp_millis();
        let id: i64 = OrderIdGenerator::default().next_id().parse().unwrap();
        assert!(id >= before);
    }
}
