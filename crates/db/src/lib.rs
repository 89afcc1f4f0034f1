pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use std::str::FromStr;

use eyre::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::config::DbConfig;

pub type DbPool = Pool<Sqlite>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    // Foreign keys are off by default in SQLite; every referential action
    // in the schema depends on them.
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn create_pool_from_config(config: &DbConfig) -> Result<DbPool> {
    create_pool(&config.database_url, config.max_connections).await
}
