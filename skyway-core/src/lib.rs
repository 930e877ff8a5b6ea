pub mod cabin;
pub mod draft;
pub mod format;
pub mod pricing;
pub mod seat;
pub mod seatmap;
pub mod services;
pub mod validation;

pub use cabin::{column_letter, layout_for, CabinClass, CabinLayout};
pub use draft::{BookingDraft, DraftState, FlightRef};
pub use pricing::{price_for, Money, PriceTable};
pub use seat::{SeatId, TakenSeats};
pub use seatmap::{classify, enumerate_seats, select_seat, SeatMap, SeatStatus};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Seat {0} is already booked")]
    SelectionRejected(SeatId),
    /// An upstream call failed. `status` is the upstream HTTP status when a
    /// response came back at all. `explained` is set when `message` is the
    /// upstream's own `message` field rather than text derived locally.
    #[error("{message}")]
    RemoteFailure {
        status: Option<u16>,
        message: String,
        explained: bool,
    },
    #[error("Invalid booking transition: {0}")]
    InvalidTransition(String),
}

impl CoreError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteFailure {
            status: None,
            message: message.into(),
            explained: false,
        }
    }

    /// Failure the upstream answered with its own `message`.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteFailure {
            status: Some(status),
            message: message.into(),
            explained: true,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Upstream HTTP status, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::RemoteFailure { status, .. } => *status,
            _ => None,
        }
    }

    /// Text shown to the user next to the blocked action.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::ValidationError(msg) => msg.clone(),
            CoreError::RemoteFailure { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
