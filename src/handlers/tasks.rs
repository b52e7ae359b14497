use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    middleware::CurrentUser,
    models::{CreateTask, DeleteResponse, SuccessResponse, TaskDetail, UpdateTask},
    services::task,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/project/{projectId}/section/{sectionId}/task",
    params(
        ("projectId" = i64, Path, description = "Project ID"),
        ("sectionId" = i64, Path, description = "Section ID")
    ),
    request_body = CreateTask,
    responses(
        (status = 200, description = "Task created", body = SuccessResponse),
        (status = 400, description = "Section does not belong to the project"),
        (status = 403, description = "Not the project owner"),
        (status = 404, description = "Project or section not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((project_id, section_id)): Path<(i64, i64)>,
    Json(payload): Json<CreateTask>,
) -> Result<Json<SuccessResponse>, AppError> {
    let success = task::create(&state.pool, user.id, project_id, section_id, payload).await?;
    Ok(Json(SuccessResponse { success }))
}

#[utoipa::path(
    get,
    path = "/api/task",
    responses(
        (status = 200, description = "Open tasks of the current user", body = Vec<TaskDetail>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "tasks"
)]
pub async fn get_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TaskDetail>>, AppError> {
    Ok(Json(task::retrieve_all(&state.pool, user.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/task/{taskId}",
    params(
        ("taskId" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task with sub-tasks and labels", body = TaskDetail),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "tasks"
)]
pub async fn get_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskDetail>, AppError> {
    Ok(Json(task::retrieve_by_id(&state.pool, task_id, user.id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/task/{taskId}",
    params(
        ("taskId" = i64, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = SuccessResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Task or label not found")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "tasks"
)]
pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
    Json(payload): Json<UpdateTask>,
) -> Result<Json<SuccessResponse>, AppError> {
    let success = task::update(&state.pool, task_id, user.id, payload).await?;
    Ok(Json(SuccessResponse { success }))
}

#[utoipa::path(
    delete,
    path = "/api/task/{taskId}",
    params(
        ("taskId" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Number of deleted rows", body = DeleteResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "tasks"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    // Unlike the other task routes, deletion does not check ownership.
    let deleted = task::remove(&state.pool, task_id).await?;
    Ok(Json(DeleteResponse { deleted }))
}
