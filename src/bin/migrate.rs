use storefront_api::store::{SqliteStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://orders.db".to_string());
    let store = SqliteStore::open(&database_url).await?;
    let reviews = store.count_reviews().await?;
    println!("Migrations applied ({reviews} reviews stored)");
    Ok(())
}
