use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

use skyway_core::validation::{validate_login, validate_password_change, validate_registration};
use skyway_shared::models::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, User};

use crate::bookings::{require_token, BearerHeader};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/me", get(me))
        .route("/v1/auth/password", put(change_password))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_registration(&req)?;
    let response = state.auth.register(&req).await?;
    info!("Registered {}", req.email);
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_login(&req)?;
    let response = state.auth.login(&req).await?;
    info!("User {} logged in", req.email);
    Ok(Json(response))
}

async fn me(State(state): State<AppState>, bearer: Option<BearerHeader>) -> Result<Json<User>, AppError> {
    let token = require_token(bearer)?;
    Ok(Json(state.auth.me(&token).await?))
}

async fn change_password(
    State(state): State<AppState>,
    bearer: Option<BearerHeader>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    let token = require_token(bearer)?;
    validate_password_change(&req)?;
    state.auth.change_password(&token, &req).await?;
    Ok(StatusCode::NO_CONTENT)
}
