use std::{str::FromStr, time::Duration};

use chrono::{SecondsFormat, Utc};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

pub type DbPool = SqlitePool;

pub const SAMPLE_REVIEWS: [&str; 5] = [
    "fast and easy",
    "yo this was fire dude",
    "Very easy to use and great customer support",
    "Excellent gift! My younger brother really enjoyed these",
    "My kids love them. 5 stars!",
];

/// Open the SQLite pool, creating the database file when it does not exist yet.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Single-connection in-memory pool. Every connection to `:memory:` is its own
/// database, so the pool must never open a second one or recycle the first.
pub async fn create_memory_pool() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Insert the sample reviews when the table is empty. Returns how many rows were written.
pub async fn seed_reviews(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
        .fetch_one(&mut *tx)
        .await?;
    if count > 0 {
        tx.rollback().await?;
        return Ok(0);
    }

    for text in SAMPLE_REVIEWS {
        sqlx::query("INSERT INTO reviews (text, date) VALUES (?, ?)")
            .bind(text)
            .bind(now_timestamp())
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(count = SAMPLE_REVIEWS.len(), "seeded default reviews");
    Ok(SAMPLE_REVIEWS.len())
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
