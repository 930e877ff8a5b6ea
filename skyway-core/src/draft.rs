//! Client-side booking draft: which flight, which cabin, which seat, and
//! whether the reservation has been sent.
//!
//! Transitions:
//!
//! ```text
//! NoFlightSelected --select_flight--> FlightSelected(Economy)
//! FlightSelected/SeatChosen --change_cabin_class--> FlightSelected(new cabin)
//! FlightSelected/SeatChosen --choose_seat--> SeatChosen
//! SeatChosen --begin_submission--> Submitting
//! Submitting --finish_submission(Ok)--> Confirmed
//! Submitting --finish_submission(Err)--> SeatChosen (error kept for display)
//! ```
//!
//! Nothing but `finish_submission` is accepted while `Submitting`.

use std::mem;

use skyway_shared::models::{BookingConfirmation, CreateBooking, Flight};
use tracing::{info, warn};

use crate::cabin::CabinClass;
use crate::pricing::{price_for, Money, PriceTable};
use crate::seat::{SeatId, TakenSeats};
use crate::seatmap::{select_seat, SeatMap};
use crate::services::{AccessToken, BookingService};
use crate::{CoreError, CoreResult};

pub const MISSING_SEAT_MESSAGE: &str = "Please select a seat before confirming the booking";
pub const MISSING_FLIGHT_MESSAGE: &str = "Please select a flight before booking";

/// The parts of a flight record the draft needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRef {
    pub id: String,
    pub prices: PriceTable,
}

impl From<&Flight> for FlightRef {
    fn from(flight: &Flight) -> Self {
        Self {
            id: flight.id.clone(),
            prices: PriceTable::from(flight),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DraftState {
    #[default]
    NoFlightSelected,
    FlightSelected {
        flight: FlightRef,
        cabin: CabinClass,
    },
    SeatChosen {
        flight: FlightRef,
        cabin: CabinClass,
        seat: SeatId,
    },
    Submitting {
        flight: FlightRef,
        cabin: CabinClass,
        seat: SeatId,
    },
    Confirmed {
        flight: FlightRef,
        cabin: CabinClass,
        seat: SeatId,
        confirmation: BookingConfirmation,
    },
}

impl DraftState {
    pub fn name(&self) -> &'static str {
        match self {
            DraftState::NoFlightSelected => "no flight selected",
            DraftState::FlightSelected { .. } => "flight selected",
            DraftState::SeatChosen { .. } => "seat chosen",
            DraftState::Submitting { .. } => "submitting",
            DraftState::Confirmed { .. } => "confirmed",
        }
    }

    pub fn flight(&self) -> Option<&FlightRef> {
        match self {
            DraftState::NoFlightSelected => None,
            DraftState::FlightSelected { flight, .. }
            | DraftState::SeatChosen { flight, .. }
            | DraftState::Submitting { flight, .. }
            | DraftState::Confirmed { flight, .. } => Some(flight),
        }
    }

    pub fn cabin(&self) -> Option<CabinClass> {
        match self {
            DraftState::NoFlightSelected => None,
            DraftState::FlightSelected { cabin, .. }
            | DraftState::SeatChosen { cabin, .. }
            | DraftState::Submitting { cabin, .. }
            | DraftState::Confirmed { cabin, .. } => Some(*cabin),
        }
    }

    pub fn seat(&self) -> Option<&SeatId> {
        match self {
            DraftState::NoFlightSelected | DraftState::FlightSelected { .. } => None,
            DraftState::SeatChosen { seat, .. }
            | DraftState::Submitting { seat, .. }
            | DraftState::Confirmed { seat, .. } => Some(seat),
        }
    }
}

fn invalid(state: &DraftState, action: &str) -> CoreError {
    CoreError::InvalidTransition(format!("cannot {} while {}", action, state.name()))
}

/// Booking draft plus the taken-seat set it validates choices against.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    state: DraftState,
    taken: TakenSeats,
    last_error: Option<String>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn cabin(&self) -> Option<CabinClass> {
        self.state.cabin()
    }

    pub fn seat(&self) -> Option<&SeatId> {
        self.state.seat()
    }

    pub fn taken(&self) -> &TakenSeats {
        &self.taken
    }

    /// Message of the last rejected submit, cleared by the next successful
    /// transition.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, DraftState::Submitting { .. })
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.state, DraftState::SeatChosen { .. })
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match &self.state {
            DraftState::Confirmed { confirmation, .. } => Some(confirmation),
            _ => None,
        }
    }

    /// Total shown in the booking summary; zero until a flight is picked.
    pub fn total_price(&self) -> Money {
        match (self.state.flight(), self.state.cabin()) {
            (Some(flight), Some(cabin)) => price_for(cabin, &flight.prices),
            _ => Money::ZERO,
        }
    }

    pub fn seat_map(&self) -> Option<SeatMap> {
        let cabin = self.state.cabin()?;
        Some(SeatMap::build(cabin, &self.taken, self.state.seat()))
    }

    /// Starts over on `flight` in the default cabin with no seat.
    pub fn select_flight(&mut self, flight: impl Into<FlightRef>) -> CoreResult<()> {
        if self.is_submitting() {
            return Err(invalid(&self.state, "select another flight"));
        }
        let flight = flight.into();
        info!("Flight {} selected", flight.id);
        self.state = DraftState::FlightSelected {
            flight,
            cabin: CabinClass::DEFAULT,
        };
        self.taken = TakenSeats::new();
        self.last_error = None;
        Ok(())
    }

    /// Seat numbers are cabin-scoped, so any chosen seat is dropped.
    pub fn change_cabin_class(&mut self, cabin: CabinClass) -> CoreResult<()> {
        match mem::take(&mut self.state) {
            DraftState::FlightSelected { flight, .. } | DraftState::SeatChosen { flight, .. } => {
                self.state = DraftState::FlightSelected { flight, cabin };
                self.last_error = None;
                Ok(())
            }
            other => {
                let err = invalid(&other, "change cabin class");
                self.state = other;
                Err(err)
            }
        }
    }

    /// Picks `seat`, replacing any previous choice. A rejected seat leaves
    /// the previous choice in place.
    pub fn choose_seat(&mut self, seat: SeatId) -> CoreResult<SeatId> {
        let cabin = match &self.state {
            DraftState::FlightSelected { cabin, .. } | DraftState::SeatChosen { cabin, .. } => *cabin,
            other => return Err(invalid(other, "choose a seat")),
        };
        if !seat.belongs_to(cabin) {
            return Err(CoreError::validation(format!("Seat {} is not in {}", seat, cabin)));
        }
        let seat = select_seat(seat, &self.taken)?;

        self.state = match mem::take(&mut self.state) {
            DraftState::FlightSelected { flight, cabin } | DraftState::SeatChosen { flight, cabin, .. } => {
                DraftState::SeatChosen { flight, cabin, seat }
            }
            other => other,
        };
        self.last_error = None;
        Ok(seat)
    }

    /// Replaces the taken-seat set. A chosen seat is kept even if it now
    /// shows as taken; upstream has the final word on submit.
    pub fn refresh_taken(&mut self, taken: TakenSeats) {
        if let Some(seat) = self.state.seat() {
            if taken.contains(seat) {
                warn!("Chosen seat {} is now reported as taken", seat);
            }
        }
        self.taken = taken;
    }

    /// Moves to `Submitting` and returns the request to send upstream.
    pub fn begin_submission(&mut self) -> CoreResult<CreateBooking> {
        match mem::take(&mut self.state) {
            DraftState::SeatChosen { flight, cabin, seat } => {
                let request = CreateBooking {
                    flight_id: flight.id.clone(),
                    class_type: cabin.label().to_string(),
                    seat_number: seat.to_string(),
                };
                self.state = DraftState::Submitting { flight, cabin, seat };
                self.last_error = None;
                Ok(request)
            }
            other => {
                let err = match &other {
                    DraftState::NoFlightSelected => CoreError::validation(MISSING_FLIGHT_MESSAGE),
                    DraftState::FlightSelected { .. } => CoreError::validation(MISSING_SEAT_MESSAGE),
                    DraftState::Submitting { .. } => invalid(&other, "submit again"),
                    _ => invalid(&other, "submit"),
                };
                self.state = other;
                Err(err)
            }
        }
    }

    /// Applies the upstream outcome of the in-flight submission. On failure
    /// the draft returns to `SeatChosen` so the user can retry or pick
    /// another seat.
    pub fn finish_submission(
        &mut self,
        outcome: CoreResult<BookingConfirmation>,
    ) -> CoreResult<BookingConfirmation> {
        match mem::take(&mut self.state) {
            DraftState::Submitting { flight, cabin, seat } => match outcome {
                Ok(confirmation) => {
                    info!("Booking confirmed for seat {} on flight {}", seat, flight.id);
                    self.state = DraftState::Confirmed {
                        flight,
                        cabin,
                        seat,
                        confirmation: confirmation.clone(),
                    };
                    Ok(confirmation)
                }
                Err(e) => {
                    warn!("Booking of seat {} on flight {} failed: {}", seat, flight.id, e);
                    self.last_error = Some(e.user_message());
                    self.state = DraftState::SeatChosen { flight, cabin, seat };
                    Err(e)
                }
            },
            other => {
                let err = invalid(&other, "complete a submission");
                self.state = other;
                Err(err)
            }
        }
    }

    /// Full submit: validate locally, send, apply the outcome. No upstream
    /// call is made when the draft is not ready.
    pub async fn submit(
        &mut self,
        service: &dyn BookingService,
        token: Option<&AccessToken>,
    ) -> CoreResult<BookingConfirmation> {
        let request = match self.begin_submission() {
            Ok(request) => request,
            Err(e) => {
                self.last_error = Some(e.user_message());
                return Err(e);
            }
        };
        let outcome = service.create_booking(token, &request).await;
        self.finish_submission(outcome)
    }

    /// Drops the draft, e.g. when the user navigates away.
    pub fn discard(&mut self) {
        *self = Self::default();
    }
}
