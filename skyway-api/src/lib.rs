use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use skyway_store::app_config::CorsConfig;

pub mod auth;
pub mod bookings;
pub mod error;
pub mod feedback;
pub mod flights;
pub mod seatmap;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(seatmap::routes())
        .merge(flights::routes())
        .merge(bookings::routes())
        .merge(auth::routes())
        .merge(feedback::routes())
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allow_any_origin {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
