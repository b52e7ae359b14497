use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open (creating if missing) the database and bring its schema up to date.
pub async fn establish_connection(database_url: &str) -> anyhow::Result<SqlitePool> {
    // 1. Parse the url; foreign keys must be on for the task cascades
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // 2. Open the pool
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // 3. Run migrations
    run_migrations(&pool).await?;
    tracing::info!("migrations executed successfully");

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
