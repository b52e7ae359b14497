use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{Comment, CommentBody, SuccessResponse},
    services::comment,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/task/{taskId}/comment",
    params(
        ("taskId" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Comments of the task", body = Vec<Comment>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(comment::list(&state.pool, task_id, user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/task/{taskId}/comment",
    params(
        ("taskId" = i64, Path, description = "Task ID")
    ),
    request_body = CommentBody,
    responses(
        (status = 200, description = "Comment created", body = Comment),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
    Json(payload): Json<CommentBody>,
) -> Result<Json<Comment>, AppError> {
    Ok(Json(
        comment::create(&state.pool, task_id, user.id, &payload.content).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/task/{taskId}/comment/{commentId}",
    params(
        ("taskId" = i64, Path, description = "Task ID"),
        ("commentId" = i64, Path, description = "Comment ID")
    ),
    request_body = CommentBody,
    responses(
        (status = 200, description = "Comment updated", body = SuccessResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Task or comment not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "comments"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((task_id, comment_id)): Path<(i64, i64)>,
    Json(payload): Json<CommentBody>,
) -> Result<Json<SuccessResponse>, AppError> {
    let success =
        comment::update(&state.pool, task_id, comment_id, user.id, &payload.content).await?;
    Ok(Json(SuccessResponse { success }))
}

#[utoipa::path(
    delete,
    path = "/api/task/{taskId}/comment/{commentId}",
    params(
        ("taskId" = i64, Path, description = "Task ID"),
        ("commentId" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = SuccessResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Task or comment not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((task_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<SuccessResponse>, AppError> {
    let success = comment::remove(&state.pool, task_id, comment_id, user.id).await?;
    Ok(Json(SuccessResponse { success }))
}
