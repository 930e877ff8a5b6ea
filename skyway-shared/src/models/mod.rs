//! Wire models of the upstream REST API. Field names follow its camelCase
//! JSON; record identifiers are the API's opaque `_id` strings.

pub mod booking;
pub mod feedback;
pub mod flight;
pub mod user;

pub use booking::{BookingConfirmation, BookingDetails, BookingRecord, BookingStatus, CreateBooking};
pub use feedback::Feedback;
pub use flight::{Flight, FlightSearch};
pub use user::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, User};
