use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use skyway_core::{price_for, CabinClass, CabinLayout, Money, PriceTable, SeatId, SeatMap, TakenSeats};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/cabins", get(list_cabins))
        .route("/v1/cabins/{cabin}/seatmap", get(cabin_seat_map))
        .route("/v1/flights/{id}/seatmap", get(flight_seat_map))
}

#[derive(Debug, Deserialize)]
pub struct CabinSeatMapQuery {
    /// Comma separated seat ids.
    #[serde(default)]
    pub taken: Option<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlightSeatMapQuery {
    pub cabin: Option<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSeatMapResponse {
    pub flight_id: String,
    pub price: Money,
    pub formatted_price: String,
    #[serde(flatten)]
    pub seat_map: SeatMap,
}

async fn list_cabins() -> Json<Vec<CabinLayout>> {
    Json(CabinClass::ALL.iter().map(|cabin| cabin.layout()).collect())
}

pub(crate) fn parse_cabin(raw: &str) -> Result<CabinClass, AppError> {
    raw.parse().map_err(AppError::validation)
}

pub(crate) fn parse_seat(raw: &str) -> Result<SeatId, AppError> {
    raw.trim().parse().map_err(AppError::validation)
}

fn parse_selected(raw: Option<&str>, cabin: CabinClass) -> Result<Option<SeatId>, AppError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    let seat = parse_seat(raw)?;
    if !seat.belongs_to(cabin) {
        return Err(AppError::validation(format!("Seat {} is not in {}", seat, cabin)));
    }
    Ok(Some(seat))
}

async fn cabin_seat_map(
    Path(cabin): Path<String>,
    Query(query): Query<CabinSeatMapQuery>,
) -> Result<Json<SeatMap>, AppError> {
    let cabin = parse_cabin(&cabin)?;
    let taken = query
        .taken
        .as_deref()
        .map(|list| TakenSeats::from_labels(list.split(',').map(str::trim).filter(|s| !s.is_empty())))
        .unwrap_or_default();
    let selected = parse_selected(query.selected.as_deref(), cabin)?;

    Ok(Json(SeatMap::build(cabin, &taken, selected.as_ref())))
}

async fn flight_seat_map(
    State(state): State<AppState>,
    Path(flight_id): Path<String>,
    Query(query): Query<FlightSeatMapQuery>,
) -> Result<Json<FlightSeatMapResponse>, AppError> {
    let cabin = match query.cabin.as_deref() {
        Some(raw) => parse_cabin(raw)?,
        None => CabinClass::DEFAULT,
    };
    let selected = parse_selected(query.selected.as_deref(), cabin)?;

    let flight = state.flights.get_flight(&flight_id).await?;
    let taken = state.flights.taken_seats(&flight.id).await?;
    let price = price_for(cabin, &PriceTable::from(&flight));

    Ok(Json(FlightSeatMapResponse {
        flight_id: flight.id,
        price,
        formatted_price: price.to_string(),
        seat_map: SeatMap::build(cabin, &taken, selected.as_ref()),
    }))
}
