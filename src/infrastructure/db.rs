use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::config::DatabaseConfig;

pub type SqlitePool = sqlx::Pool<sqlx::Sqlite>;

const SCHEMA: &str = include_str!("schema.sql");

/// Opens the workshop database.
///
/// The pool holds exactly one connection that is never reaped: an in-memory
/// SQLite database lives only as long as the connection that created it, and
/// a single connection also serializes every statement and transaction.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid database url: {}", config.url))?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .with_context(|| "failed to open SQLite database")
}

pub async fn create_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .with_context(|| "failed to create workshop tables")?;
    info!("elf_profiles and toy_orders tables created");
    Ok(())
}
