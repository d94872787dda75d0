use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::services::{hash_password, CurrentUser},
    dto::MessageResponse,
    error::AppError,
    state::AppState,
    users::{
        dto::{UserCreateInput, UserList, UserResponse, UserUpdateInput},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", get(index_users).post(create_user))
        .route(
            "/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn index_users(State(state): State<AppState>) -> Result<Json<UserList>, AppError> {
    let users = User::list(&state.db).await?;
    Ok(Json(UserList {
        data: users.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(UserResponse { data: user.into() }))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserCreateInput>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if User::username_exists(&state.db, &payload.username).await? {
        warn!(username = %payload.username, "username already taken");
        return Err(AppError::Conflict("Username not available".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &hash).await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(UserResponse { data: user.into() })))
}

/// Only the owner may change a user record; acting on someone else's is
/// Forbidden even though the record exists.
#[instrument(skip(state, current, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UserUpdateInput>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if current.id != user.id {
        warn!(user_id = %current.id, target = %user.id, "update of foreign user record");
        return Err(AppError::Forbidden);
    }

    if let Some(ref username) = payload.username {
        if *username != user.username
            && User::username_taken_by_other(&state.db, username, user.id).await?
        {
            warn!(username = %username, "username already taken");
            return Err(AppError::Conflict("Username not available".into()));
        }
    }

    let username = payload.username.unwrap_or(user.username);
    let password_hash = match payload.password {
        Some(ref plain) => hash_password(plain)?,
        None => user.password_hash,
    };

    let updated = User::update(&state.db, user.id, &username, &password_hash).await?;
    info!(user_id = %updated.id, "user updated");
    Ok(Json(UserResponse {
        data: updated.into(),
    }))
}

#[instrument(skip(state, current))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if current.id != user.id {
        warn!(user_id = %current.id, target = %user.id, "delete of foreign user record");
        return Err(AppError::Forbidden);
    }

    User::delete_cascade(&state.db, user.id).await?;
    info!(user_id = %user.id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}
