use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::env;

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

pub async fn get_db_pool() -> SqlitePool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    connect(&database_url).await.expect("Failed to create pool")
}
