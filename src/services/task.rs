//! Task persistence with ownership enforcement.
//!
//! Multi-row writes (`create`, `update`) run inside a single transaction so a
//! failure at any step leaves nothing behind. `remove` is a bare delete by id.

use std::collections::BTreeSet;

use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::AppError,
    models::{Alarm, Bookmark, CreateTask, Label, Priority, Task, TaskDetail, UpdateTask},
    services::authorization::{is_project_owner, is_task_owner},
};

/// Load one task with its decorations and sub-tasks.
pub async fn retrieve_by_id(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> Result<TaskDetail, AppError> {
    let mut conn = pool.acquire().await?;

    let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::not_found("task"))?;

    if !is_task_owner(&mut *conn, id, user_id).await? {
        return Err(AppError::forbidden());
    }

    let sub_tasks = sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE parent_id = ? ORDER BY position ASC, id ASC",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    let mut detail = decorate(&mut conn, task).await?;
    for sub_task in sub_tasks {
        detail.sub_tasks.push(decorate(&mut conn, sub_task).await?);
    }

    Ok(detail)
}

/// Every open top-level task the user owns, each with its open sub-tasks.
pub async fn retrieve_all(pool: &SqlitePool, user_id: i64) -> Result<Vec<TaskDetail>, AppError> {
    let mut conn = pool.acquire().await?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT t.*
         FROM tasks t
         JOIN sections s ON s.id = t.section_id
         JOIN projects p ON p.id = s.project_id
         WHERE p.creator_id = ? AND t.is_done = 0 AND t.parent_id IS NULL
         ORDER BY t.position ASC, t.id ASC",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut details = Vec::with_capacity(tasks.len());
    for task in tasks {
        let sub_tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks
             WHERE parent_id = ? AND is_done = 0
             ORDER BY position ASC, id ASC",
        )
        .bind(task.id)
        .fetch_all(&mut *conn)
        .await?;

        let mut detail = decorate(&mut conn, task).await?;
        for sub_task in sub_tasks {
            detail.sub_tasks.push(decorate(&mut conn, sub_task).await?);
        }
        details.push(detail);
    }

    Ok(details)
}

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    project_id: i64,
    section_id: i64,
    payload: CreateTask,
) -> Result<bool, AppError> {
    let project: Option<i64> = sqlx::query_scalar("SELECT id FROM projects WHERE id = ?")
        .bind(project_id)
        .fetch_optional(pool)
        .await?;
    if project.is_none() {
        return Err(AppError::not_found("project"));
    }
    if !is_project_owner(pool, project_id, user_id).await? {
        return Err(AppError::forbidden());
    }
    if payload.title.trim().is_empty() {
        return Err(AppError::ValidationError("title must not be empty".to_string()));
    }

    // Dropping `tx` on an early return rolls it back.
    let mut tx = pool.begin().await?;

    let section_project: Option<i64> =
        sqlx::query_scalar("SELECT project_id FROM sections WHERE id = ?")
            .bind(section_id)
            .fetch_optional(&mut *tx)
            .await?;
    match section_project {
        None => return Err(AppError::not_found("section")),
        Some(owner) if owner != project_id => {
            return Err(AppError::wrong_relation("section does not belong to project"))
        }
        Some(_) => {}
    }

    if let Some(parent_id) = payload.parent_id {
        let parent_section: Option<i64> =
            sqlx::query_scalar("SELECT section_id FROM tasks WHERE id = ?")
                .bind(parent_id)
                .fetch_optional(&mut *tx)
                .await?;
        match parent_section {
            None => return Err(AppError::not_found("parent task")),
            Some(parent_section) if parent_section != section_id => {
                return Err(AppError::wrong_relation("parent task is in another section"))
            }
            Some(_) => {}
        }
    }

    if let Some(priority_id) = payload.priority_id {
        ensure_priority(&mut tx, priority_id).await?;
    }

    let position = next_position(&mut tx, section_id).await?;

    let task_id = sqlx::query(
        "INSERT INTO tasks (title, position, due_date, section_id, project_id, parent_id, priority_id)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.title)
    .bind(position)
    .bind(payload.due_date)
    .bind(section_id)
    .bind(project_id)
    .bind(payload.parent_id)
    .bind(payload.priority_id)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    if let Some(label_ids) = &payload.label_ids {
        attach_labels(&mut tx, task_id, user_id, label_ids).await?;
    }

    tx.commit().await?;
    tracing::debug!(task_id, section_id, position, "task created");

    Ok(true)
}

pub async fn update(
    pool: &SqlitePool,
    task_id: i64,
    user_id: i64,
    changes: UpdateTask,
) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    match apply_update(&mut tx, task_id, user_id, &changes).await {
        Ok(()) => {
            tx.commit().await?;
            tracing::debug!(task_id, "task updated");
            Ok(true)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(task_id, "rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

async fn apply_update(
    conn: &mut SqliteConnection,
    task_id: i64,
    user_id: i64,
    changes: &UpdateTask,
) -> Result<(), AppError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM tasks WHERE id = ?")
        .bind(task_id)
        .fetch_optional(&mut *conn)
        .await?;
    if exists.is_none() {
        return Err(AppError::not_found("task"));
    }
    if !is_task_owner(&mut *conn, task_id, user_id).await? {
        return Err(AppError::forbidden());
    }

    if matches!(&changes.title, Some(title) if title.trim().is_empty()) {
        return Err(AppError::ValidationError("title must not be empty".to_string()));
    }
    if let Some(priority_id) = changes.priority_id {
        ensure_priority(conn, priority_id).await?;
    }

    sqlx::query(
        "UPDATE tasks SET
            title = COALESCE(?, title),
            is_done = COALESCE(?, is_done),
            position = COALESCE(?, position),
            due_date = COALESCE(?, due_date),
            priority_id = COALESCE(?, priority_id),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?",
    )
    .bind(&changes.title)
    .bind(changes.is_done)
    .bind(changes.position)
    .bind(changes.due_date)
    .bind(changes.priority_id)
    .bind(task_id)
    .execute(&mut *conn)
    .await?;

    if let Some(label_ids) = &changes.label_ids {
        sqlx::query("DELETE FROM task_labels WHERE task_id = ?")
            .bind(task_id)
            .execute(&mut *conn)
            .await?;
        attach_labels(conn, task_id, user_id, label_ids).await?;
    }

    Ok(())
}

/// Delete by id. Performs no ownership or existence check.
pub async fn remove(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    tracing::debug!(task_id = id, deleted = result.rows_affected(), "task removed");
    Ok(result.rows_affected())
}

async fn next_position(conn: &mut SqliteConnection, section_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COALESCE(MAX(position), 0) + 1 FROM tasks WHERE section_id = ?")
        .bind(section_id)
        .fetch_one(conn)
        .await
}

async fn ensure_priority(conn: &mut SqliteConnection, priority_id: i64) -> Result<(), AppError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM priorities WHERE id = ?")
        .bind(priority_id)
        .fetch_optional(conn)
        .await?;

    found.map(|_| ()).ok_or_else(|| AppError::not_found("priority"))
}

async fn attach_labels(
    conn: &mut SqliteConnection,
    task_id: i64,
    user_id: i64,
    label_ids: &[i64],
) -> Result<(), AppError> {
    // Another user's label is reported as missing.
    for label_id in label_ids.iter().copied().collect::<BTreeSet<_>>() {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM labels WHERE id = ? AND creator_id = ?")
                .bind(label_id)
                .bind(user_id)
                .fetch_optional(&mut *conn)
                .await?;
        if found.is_none() {
            return Err(AppError::not_found("label"));
        }

        sqlx::query("INSERT INTO task_labels (task_id, label_id) VALUES (?, ?)")
            .bind(task_id)
            .bind(label_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn decorate(conn: &mut SqliteConnection, task: Task) -> Result<TaskDetail, sqlx::Error> {
    let priority = match task.priority_id {
        Some(priority_id) => {
            sqlx::query_as::<_, Priority>("SELECT * FROM priorities WHERE id = ?")
                .bind(priority_id)
                .fetch_optional(&mut *conn)
                .await?
        }
        None => None,
    };

    let alarm = sqlx::query_as::<_, Alarm>("SELECT * FROM alarms WHERE task_id = ?")
        .bind(task.id)
        .fetch_optional(&mut *conn)
        .await?;

    let labels = sqlx::query_as::<_, Label>(
        "SELECT l.*
         FROM labels l
         JOIN task_labels tl ON tl.label_id = l.id
         WHERE tl.task_id = ?
         ORDER BY l.id",
    )
    .bind(task.id)
    .fetch_all(&mut *conn)
    .await?;

    let bookmarks = sqlx::query_as::<_, Bookmark>("SELECT * FROM bookmarks WHERE task_id = ? ORDER BY id")
        .bind(task.id)
        .fetch_all(&mut *conn)
        .await?;

    let mut detail = TaskDetail::from_task(task);
    detail.priority = priority;
    detail.alarm = alarm;
    detail.labels = labels;
    detail.bookmarks = bookmarks;

    Ok(detail)
}
