//! Ownership predicates.
//!
//! Every decision walks the chain task → section → project → `creator_id`
//! and compares the end of it with the acting user. An unresolvable chain
//! (missing row) is simply "not the owner"; callers that need to tell a
//! missing row apart from a foreign one look the row up first.

use sqlx::{Executor, Sqlite};

/// Whether a resolved creator id belongs to `user_id`.
pub fn owned_by(creator_id: Option<i64>, user_id: i64) -> bool {
    creator_id == Some(user_id)
}

pub async fn is_project_owner<'e, E>(
    executor: E,
    project_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let creator_id: Option<i64> =
        sqlx::query_scalar("SELECT creator_id FROM projects WHERE id = ?")
            .bind(project_id)
            .fetch_optional(executor)
            .await?;

    Ok(owned_by(creator_id, user_id))
}

pub async fn is_section_owner<'e, E>(
    executor: E,
    section_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let creator_id: Option<i64> = sqlx::query_scalar(
        "SELECT p.creator_id
         FROM sections s
         JOIN projects p ON p.id = s.project_id
         WHERE s.id = ?",
    )
    .bind(section_id)
    .fetch_optional(executor)
    .await?;

    Ok(owned_by(creator_id, user_id))
}

pub async fn is_task_owner<'e, E>(
    executor: E,
    task_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let creator_id: Option<i64> = sqlx::query_scalar(
        "SELECT p.creator_id
         FROM tasks t
         JOIN sections s ON s.id = t.section_id
         JOIN projects p ON p.id = s.project_id
         WHERE t.id = ?",
    )
    .bind(task_id)
    .fetch_optional(executor)
    .await?;

    Ok(owned_by(creator_id, user_id))
}
