use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::Comment,
    services::authorization::is_task_owner,
};

async fn ensure_task_access(pool: &SqlitePool, task_id: i64, user_id: i64) -> Result<(), AppError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM tasks WHERE id = ?")
        .bind(task_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::not_found("task"));
    }
    if !is_task_owner(pool, task_id, user_id).await? {
        return Err(AppError::forbidden());
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::ValidationError("comment must not be empty".to_string()));
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool, task_id: i64, user_id: i64) -> Result<Vec<Comment>, AppError> {
    ensure_task_access(pool, task_id, user_id).await?;

    let comments = sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments WHERE task_id = ? ORDER BY created_at ASC, id ASC",
    )
    .bind(task_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

pub async fn create(
    pool: &SqlitePool,
    task_id: i64,
    user_id: i64,
    content: &str,
) -> Result<Comment, AppError> {
    ensure_task_access(pool, task_id, user_id).await?;
    validate_content(content)?;

    let id = sqlx::query("INSERT INTO comments (task_id, content) VALUES (?, ?)")
        .bind(task_id)
        .bind(content)
        .execute(pool)
        .await?
        .last_insert_rowid();

    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    tracing::debug!(task_id, comment_id = id, "comment created");
    Ok(comment)
}

pub async fn update(
    pool: &SqlitePool,
    task_id: i64,
    comment_id: i64,
    user_id: i64,
    content: &str,
) -> Result<bool, AppError> {
    ensure_task_access(pool, task_id, user_id).await?;
    validate_content(content)?;

    let result = sqlx::query(
        "UPDATE comments SET content = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ? AND task_id = ?",
    )
    .bind(content)
    .bind(comment_id)
    .bind(task_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("comment"));
    }
    Ok(true)
}

pub async fn remove(
    pool: &SqlitePool,
    task_id: i64,
    comment_id: i64,
    user_id: i64,
) -> Result<bool, AppError> {
    ensure_task_access(pool, task_id, user_id).await?;

    let result = sqlx::query("DELETE FROM comments WHERE id = ? AND task_id = ?")
        .bind(comment_id)
        .bind(task_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("comment"));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_pool, seed_project, seed_section, seed_task, seed_user};

    #[tokio::test]
    async fn comments_are_scoped_to_their_task() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice@example.com").await;
        let project = seed_project(&pool, alice).await;
        let section = seed_section(&pool, project).await;
        let first = seed_task(&pool, project, section, "first").await;
        let second = seed_task(&pool, project, section, "second").await;

        let comment = create(&pool, first, alice, "looks good").await.unwrap();
        assert_eq!(comment.task_id, first);

        assert!(update(&pool, first, comment.id, alice, "looks great").await.unwrap());
        assert!(matches!(
            update(&pool, second, comment.id, alice, "wrong task").await,
            Err(AppError::NotFound(_))
        ));

        let comments = list(&pool, first, alice).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "looks great");

        assert!(remove(&pool, first, comment.id, alice).await.unwrap());
        assert!(list(&pool, first, alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn strangers_cannot_comment() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice@example.com").await;
        let bob = seed_user(&pool, "bob@example.com").await;
        let project = seed_project(&pool, alice).await;
        let section = seed_section(&pool, project).await;
        let task = seed_task(&pool, project, section, "mine").await;

        assert!(matches!(
            create(&pool, task, bob, "hi").await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            list(&pool, 999, alice).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            create(&pool, task, alice, "   ").await,
            Err(AppError::ValidationError(_))
        ));
    }
}
