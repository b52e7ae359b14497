//! Fixtures shared by the unit and HTTP tests.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::{config::Config, db, handlers::auth::issue_token};

/// In-memory database with the schema applied.
///
/// A single long-lived connection: every new `:memory:` connection would
/// otherwise see its own empty database.
pub async fn memory_pool() -> SqlitePool {
    // Task deletion relies on ON DELETE CASCADE.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid in-memory database url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create in-memory database");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_config() -> Config {
    Config::for_database("sqlite::memory:")
}

pub fn bearer_for(email: &str) -> String {
    let token = issue_token(&test_config(), email).expect("Failed to issue token");
    format!("Bearer {}", token.access_token)
}

pub async fn seed_user(pool: &SqlitePool, email: &str) -> i64 {
    let name = email.split('@').next().unwrap_or(email);
    sqlx::query("INSERT INTO users (name, email, hashed_password) VALUES (?, ?, 'not-a-hash')")
        .bind(name)
        .bind(email)
        .execute(pool)
        .await
        .expect("Failed to seed user")
        .last_insert_rowid()
}

pub async fn seed_project(pool: &SqlitePool, creator_id: i64) -> i64 {
    sqlx::query("INSERT INTO projects (title, creator_id) VALUES ('Project', ?)")
        .bind(creator_id)
        .execute(pool)
        .await
        .expect("Failed to seed project")
        .last_insert_rowid()
}

pub async fn seed_section(pool: &SqlitePool, project_id: i64) -> i64 {
    sqlx::query("INSERT INTO sections (title, project_id) VALUES ('Section', ?)")
        .bind(project_id)
        .execute(pool)
        .await
        .expect("Failed to seed section")
        .last_insert_rowid()
}

pub async fn seed_task(pool: &SqlitePool, project_id: i64, section_id: i64, title: &str) -> i64 {
    sqlx::query(
        "INSERT INTO tasks (title, position, section_id, project_id)
         VALUES (?, (SELECT COALESCE(MAX(position), 0) + 1 FROM tasks WHERE section_id = ?), ?, ?)",
    )
    .bind(title)
    .bind(section_id)
    .bind(section_id)
    .bind(project_id)
    .execute(pool)
    .await
    .expect("Failed to seed task")
    .last_insert_rowid()
}

pub async fn seed_label(pool: &SqlitePool, creator_id: i64, title: &str) -> i64 {
    sqlx::query("INSERT INTO labels (title, creator_id) VALUES (?, ?)")
        .bind(title)
        .bind(creator_id)
        .execute(pool)
        .await
        .expect("Failed to seed label")
        .last_insert_rowid()
}
