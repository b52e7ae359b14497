//! Projects, sections and labels: the rows tasks hang off.

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{CreateLabel, Label, Project, Section},
    services::authorization::{is_project_owner, is_section_owner},
};

const DEFAULT_LABEL_COLOR: &str = "#808080";

fn require_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::ValidationError("title must not be empty".to_string()));
    }
    Ok(())
}

pub async fn create_project(pool: &SqlitePool, user_id: i64, title: &str) -> Result<Project, AppError> {
    require_title(title)?;

    let id = sqlx::query("INSERT INTO projects (title, creator_id) VALUES (?, ?)")
        .bind(title)
        .bind(user_id)
        .execute(pool)
        .await?
        .last_insert_rowid();

    let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    tracing::debug!(project_id = id, user_id, "project created");
    Ok(project)
}

pub async fn list_projects(pool: &SqlitePool, user_id: i64) -> Result<Vec<Project>, AppError> {
    let projects = sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE creator_id = ? ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

pub async fn create_section(
    pool: &SqlitePool,
    project_id: i64,
    user_id: i64,
    title: &str,
) -> Result<Section, AppError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM projects WHERE id = ?")
        .bind(project_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::not_found("project"));
    }
    if !is_project_owner(pool, project_id, user_id).await? {
        return Err(AppError::forbidden());
    }
    require_title(title)?;

    let id = sqlx::query("INSERT INTO sections (title, project_id) VALUES (?, ?)")
        .bind(title)
        .bind(project_id)
        .execute(pool)
        .await?
        .last_insert_rowid();

    let section = sqlx::query_as::<_, Section>("SELECT * FROM sections WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(section)
}

pub async fn rename_section(
    pool: &SqlitePool,
    section_id: i64,
    user_id: i64,
    title: &str,
) -> Result<bool, AppError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM sections WHERE id = ?")
        .bind(section_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::not_found("section"));
    }
    if !is_section_owner(pool, section_id, user_id).await? {
        return Err(AppError::forbidden());
    }
    require_title(title)?;

    sqlx::query("UPDATE sections SET title = ? WHERE id = ?")
        .bind(title)
        .bind(section_id)
        .execute(pool)
        .await?;

    Ok(true)
}

pub async fn create_label(
    pool: &SqlitePool,
    user_id: i64,
    payload: &CreateLabel,
) -> Result<Label, AppError> {
    require_title(&payload.title)?;
    let color = payload.color.as_deref().unwrap_or(DEFAULT_LABEL_COLOR);

    let id = sqlx::query("INSERT INTO labels (title, color, creator_id) VALUES (?, ?, ?)")
        .bind(&payload.title)
        .bind(color)
        .bind(user_id)
        .execute(pool)
        .await?
        .last_insert_rowid();

    let label = sqlx::query_as::<_, Label>("SELECT * FROM labels WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(label)
}

pub async fn list_labels(pool: &SqlitePool, user_id: i64) -> Result<Vec<Label>, AppError> {
    let labels = sqlx::query_as::<_, Label>(
        "SELECT * FROM labels WHERE creator_id = ? ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(labels)
}
