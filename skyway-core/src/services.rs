use async_trait::async_trait;

use skyway_shared::models::{
    AuthResponse, BookingConfirmation, BookingRecord, ChangePasswordRequest, CreateBooking, Feedback,
    Flight, FlightSearch, LoginRequest, RegisterRequest, User,
};
use skyway_shared::Masked;

use crate::seat::TakenSeats;
use crate::CoreResult;

/// Bearer token issued by the upstream API.
pub type AccessToken = Masked<String>;

/// Flight catalogue of the upstream API.
#[async_trait]
pub trait FlightService: Send + Sync {
    async fn list_flights(&self) -> CoreResult<Vec<Flight>>;

    async fn search_flights(&self, query: &FlightSearch) -> CoreResult<Vec<Flight>>;

    async fn get_flight(&self, flight_id: &str) -> CoreResult<Flight>;

    /// Seats already sold on a flight. Implementations return an empty set
    /// when the upstream does not publish seat occupancy.
    async fn taken_seats(&self, flight_id: &str) -> CoreResult<TakenSeats>;
}

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create_booking(
        &self,
        token: Option<&AccessToken>,
        booking: &CreateBooking,
    ) -> CoreResult<BookingConfirmation>;

    async fn user_bookings(&self, token: &AccessToken) -> CoreResult<Vec<BookingRecord>>;

    async fn cancel_booking(&self, token: &AccessToken, booking_id: &str) -> CoreResult<()>;
}

#[async_trait]
pub trait FeedbackService: Send + Sync {
    async fn submit_feedback(&self, token: Option<&AccessToken>, feedback: &Feedback) -> CoreResult<Feedback>;

    async fn user_feedback(&self, token: &AccessToken) -> CoreResult<Vec<Feedback>>;
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> CoreResult<AuthResponse>;

    async fn login(&self, request: &LoginRequest) -> CoreResult<AuthResponse>;

    async fn me(&self, token: &AccessToken) -> CoreResult<User>;

    async fn change_password(&self, token: &AccessToken, request: &ChangePasswordRequest) -> CoreResult<()>;
}
