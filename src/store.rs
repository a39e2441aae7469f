use async_trait::async_trait;
use thiserror::Error;

use crate::{
    db::{self, DbPool},
    models::Order,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result of an idempotent order insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A row with the same id already existed and was left untouched.
    Duplicate,
}

/// Persistence seam shared by every route handler.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_order(&self, order: &Order) -> Result<InsertOutcome, StoreError>;

    async fn get_order(&self, id: &str) -> Result<Option<Order>, StoreError>;

    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Stores `text` as given; callers trim and validate.
    async fn insert_review(&self, text: &str) -> Result<(), StoreError>;

    async fn list_reviews(&self) -> Result<Vec<String>, StoreError>;

    async fn count_reviews(&self) -> Result<i64, StoreError>;
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database, apply migrations, and seed reviews on first boot.
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        let pool = db::create_pool(database_url).await?;
        Self::initialize(pool).await
    }

    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let pool = db::create_memory_pool().await?;
        Self::initialize(pool).await
    }

    async fn initialize(pool: DbPool) -> Result<Self, StoreError> {
        db::run_migrations(&pool).await?;
        db::seed_reviews(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_order(&self, order: &Order) -> Result<InsertOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders (id, email, items, total, date)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&order.id)
        .bind(&order.email)
        .bind(&order.items)
        .bind(order.total)
        .bind(&order.date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::Duplicate)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn get_order(&self, id: &str) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, email, items, total, date FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, email, items, total, date FROM orders ORDER BY date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    async fn insert_review(&self, text: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO reviews (text, date) VALUES (?, ?)")
            .bind(text)
            .bind(db::now_timestamp())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT text FROM reviews ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(text,)| text).collect())
    }

    async fn count_reviews(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
