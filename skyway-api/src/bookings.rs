use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use serde::{Deserialize, Serialize};
use tracing::info;

use skyway_core::draft::{MISSING_FLIGHT_MESSAGE, MISSING_SEAT_MESSAGE};
use skyway_core::services::AccessToken;
use skyway_core::{BookingDraft, CabinClass, Money};
use skyway_shared::models::{BookingDetails, BookingRecord};

use crate::error::AppError;
use crate::seatmap::{parse_cabin, parse_seat};
use crate::state::AppState;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to continue";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(user_bookings).post(create_booking))
        .route("/v1/bookings/{id}", delete(cancel_booking))
}

pub(crate) type BearerHeader = TypedHeader<Authorization<Bearer>>;

pub(crate) fn bearer_token(header: Option<BearerHeader>) -> Option<AccessToken> {
    header.map(|TypedHeader(Authorization(bearer))| AccessToken::from(bearer.token()))
}

pub(crate) fn require_token(header: Option<BearerHeader>) -> Result<AccessToken, AppError> {
    bearer_token(header).ok_or_else(|| AppError::AuthenticationError(LOGIN_REQUIRED_MESSAGE.to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub flight_id: String,
    #[serde(default)]
    pub cabin_class: Option<String>,
    #[serde(default)]
    pub seat_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking: BookingDetails,
    pub seat_number: String,
    pub cabin_class: CabinClass,
    pub total_price: Money,
    pub formatted_price: String,
}

async fn create_booking(
    State(state): State<AppState>,
    bearer: Option<BearerHeader>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    // Everything that can be checked locally is checked before upstream is touched.
    if req.flight_id.trim().is_empty() {
        return Err(AppError::validation(MISSING_FLIGHT_MESSAGE));
    }
    let cabin = match req.cabin_class.as_deref() {
        Some(raw) => parse_cabin(raw)?,
        None => CabinClass::DEFAULT,
    };
    let seat = match req.seat_number.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => parse_seat(raw)?,
        None => return Err(AppError::validation(MISSING_SEAT_MESSAGE)),
    };
    if !seat.belongs_to(cabin) {
        return Err(AppError::validation(format!("Seat {} is not in {}", seat, cabin)));
    }

    let flight = state.flights.get_flight(&req.flight_id).await?;
    let taken = state.flights.taken_seats(&flight.id).await?;

    let mut draft = BookingDraft::new();
    draft.select_flight(&flight)?;
    draft.refresh_taken(taken);
    draft.change_cabin_class(cabin)?;
    draft.choose_seat(seat)?;
    let total_price = draft.total_price();

    let token = bearer_token(bearer);
    let confirmation = draft.submit(state.bookings.as_ref(), token.as_ref()).await?;
    info!("Booked seat {} on flight {}", seat, flight.id);

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booking: confirmation.booking,
            seat_number: seat.to_string(),
            cabin_class: cabin,
            total_price,
            formatted_price: total_price.to_string(),
        }),
    ))
}

async fn user_bookings(
    State(state): State<AppState>,
    bearer: Option<BearerHeader>,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    let token = require_token(bearer)?;
    Ok(Json(state.bookings.user_bookings(&token).await?))
}

async fn cancel_booking(
    State(state): State<AppState>,
    bearer: Option<BearerHeader>,
    Path(booking_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let token = require_token(bearer)?;
    state.bookings.cancel_booking(&token, &booking_id).await?;
    info!("Cancelled booking {}", booking_id);
    Ok(StatusCode::NO_CONTENT)
}
