use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use skyway_core::validation::validate_feedback;
use skyway_shared::models::Feedback;

use crate::bookings::{bearer_token, require_token, BearerHeader};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/feedback", get(user_feedback).post(submit_feedback))
}

async fn submit_feedback(
    State(state): State<AppState>,
    bearer: Option<BearerHeader>,
    Json(feedback): Json<Feedback>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    validate_feedback(&feedback)?;
    let token = bearer_token(bearer);
    let saved = state.feedback.submit_feedback(token.as_ref(), &feedback).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn user_feedback(
    State(state): State<AppState>,
    bearer: Option<BearerHeader>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    let token = require_token(bearer)?;
    Ok(Json(state.feedback.user_feedback(&token).await?))
}
