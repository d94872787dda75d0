use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::services::CurrentUser,
    dto::MessageResponse,
    error::AppError,
    state::AppState,
    todos::{
        dto::{TodoCreateInput, TodoFilter, TodoList, TodoResponse, TodoUpdateInput},
        repo::Todo,
        services,
    },
};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos/:todo_id", patch(patch_todo).delete(delete_todo))
}

#[instrument(skip(state, user, payload))]
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<TodoCreateInput>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = Todo::create(
        &state.db,
        user.id,
        &payload.title,
        payload.description.as_deref(),
        payload.status,
    )
    .await?;
    info!(todo_id = %todo.id, user_id = %user.id, "todo created");
    Ok(Json(TodoResponse { data: todo.into() }))
}

#[instrument(skip(state, user))]
pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<TodoFilter>,
) -> Result<Json<TodoList>, AppError> {
    let todos = Todo::list_by_owner(&state.db, user.id, &filter).await?;
    Ok(Json(TodoList {
        data: todos.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state, user, payload))]
pub async fn patch_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(todo_id): Path<Uuid>,
    Json(payload): Json<TodoUpdateInput>,
) -> Result<Json<TodoResponse>, AppError> {
    let mut todo = Todo::find_by_owner(&state.db, todo_id, user.id)
        .await?
        .ok_or_else(|| {
            warn!(todo_id = %todo_id, user_id = %user.id, "todo not found for owner");
            AppError::NotFound("Task not found".into())
        })?;

    services::apply_update(&mut todo, payload);
    let todo = Todo::update(&state.db, &todo).await?;
    info!(todo_id = %todo.id, user_id = %user.id, "todo updated");
    Ok(Json(TodoResponse { data: todo.into() }))
}

#[instrument(skip(state, user))]
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(todo_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = Todo::delete_by_owner(&state.db, todo_id, user.id).await?;
    if !deleted {
        warn!(todo_id = %todo_id, user_id = %user.id, "todo not found for owner");
        return Err(AppError::NotFound("Task not found".into()));
    }
    info!(todo_id = %todo_id, user_id = %user.id, "todo deleted");
    Ok(Json(MessageResponse::new(
        "Task has been deleted successfully.",
    )))
}
