//! Helpers for tests that need a live store.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::DbPool;

/// Opens a private in-memory store with the schema and default vocabularies.
///
/// The pool holds a single connection that is never recycled, since an
/// in-memory database disappears with its last connection.
pub async fn create_test_pool() -> DbPool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid in-memory connection string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory test database");

    crate::schema::initialize_database(&pool)
        .await
        .expect("Failed to initialize test database schema");
    crate::schema::seed_defaults(&pool)
        .await
        .expect("Failed to seed test database");

    pool
}
