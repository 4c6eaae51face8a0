use airline_core::User;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{error::AppError, state::AppState, validation::validate};

// Self/role checks on /user/{username} happen in the authorization middleware,
// against the same decoded username these handlers receive.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route(
            "/user/{username}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate(&user)?;
    let username = user.username.clone();
    state.users.create(user).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": format!("User {} created", username) })),
    ))
}

async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get(&username).await?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(user): Json<User>,
) -> Result<Json<Value>, AppError> {
    // Unknown user is a 404 even when the body is also invalid
    if !state.users.exists(&username).await {
        return Err(AppError::NotFoundError(format!("User {} not found", username)));
    }
    validate(&user)?;
    state.users.update(&username, user).await?;
    Ok(Json(json!({ "message": format!("User {} updated", username) })))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.users.delete(&username).await?;
    Ok(Json(json!({ "message": format!("User {} deleted", username) })))
}
