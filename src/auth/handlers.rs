use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AccessTokenRequest, TokenResponse},
        services::{verify_password, CurrentUser, JwtKeys},
    },
    error::AppError,
    state::AppState,
    users::{dto::UserResponse, repo::User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(login_for_access_token))
        .route("/auth/refresh_token", post(refresh_access_token))
        .route("/auth/me", get(get_me))
}

#[instrument(skip(state, form))]
pub async fn login_for_access_token(
    State(state): State<AppState>,
    Form(form): Form<AccessTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = match User::find_by_username(&state.db, &form.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %form.username, "login with unknown username");
            return Err(AppError::Unauthorized(
                "Incorrect username or password".into(),
            ));
        }
    };

    if !verify_password(&form.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(AppError::Unauthorized(
            "Incorrect username or password".into(),
        ));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, "access token issued");
    Ok(Json(TokenResponse::bearer(token)))
}

/// Requires a currently valid token; an expired one fails exactly like an
/// invalid one.
#[instrument(skip(state, user))]
pub async fn refresh_access_token(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<TokenResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, "access token refreshed");
    Ok(Json(TokenResponse::bearer(token)))
}

#[instrument(skip(user))]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse { data: user.into() })
}
