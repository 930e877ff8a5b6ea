use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use skyway_core::format::{capitalize_words, format_date, format_date_time, format_time};
use skyway_shared::models::{Flight, FlightSearch};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(list_flights))
        .route("/v1/flights/search", get(search_flights))
        .route("/v1/flights/{id}", get(get_flight))
}

/// Flight record plus the display strings the booking screens show.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightView {
    #[serde(flatten)]
    pub flight: Flight,
    pub route_label: String,
    pub departure_date_label: String,
    pub departure_time_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_label: Option<String>,
}

impl From<Flight> for FlightView {
    fn from(flight: Flight) -> Self {
        Self {
            route_label: format!("{} to {}", capitalize_words(&flight.from), capitalize_words(&flight.to)),
            departure_date_label: format_date(&flight.depart_date),
            departure_time_label: format_time(&flight.depart_date),
            return_label: flight.return_leg().as_ref().map(format_date_time),
            flight,
        }
    }
}

async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<FlightView>>, AppError> {
    let flights = state.flights.list_flights().await?;
    Ok(Json(flights.into_iter().map(FlightView::from).collect()))
}

async fn search_flights(
    State(state): State<AppState>,
    Query(search): Query<FlightSearch>,
) -> Result<Json<Vec<FlightView>>, AppError> {
    let search = search.normalized();
    tracing::debug!("Flight search {:?}", search);
    let flights = state.flights.search_flights(&search).await?;
    Ok(Json(flights.into_iter().map(FlightView::from).collect()))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<String>,
) -> Result<Json<FlightView>, AppError> {
    let flight = state.flights.get_flight(&flight_id).await?;
    Ok(Json(FlightView::from(flight)))
}
