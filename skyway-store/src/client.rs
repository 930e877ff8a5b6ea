use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use skyway_core::services::{AccessToken, AuthService, BookingService, FeedbackService, FlightService};
use skyway_core::{CoreError, CoreResult, TakenSeats};
use skyway_shared::models::{
    AuthResponse, BookingConfirmation, BookingRecord, ChangePasswordRequest, CreateBooking, Feedback,
    Flight, FlightSearch, LoginRequest, RegisterRequest, User,
};

use crate::app_config::UpstreamConfig;

pub const UNREACHABLE_MESSAGE: &str = "Unable to connect to server";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from server";

/// JSON client for the upstream REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(request: RequestBuilder, token: Option<&AccessToken>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    async fn dispatch(&self, request: RequestBuilder) -> CoreResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Upstream request failed: {}", e);
            CoreError::remote(UNREACHABLE_MESSAGE)
        })?;

        let status = response.status();
        debug!("Upstream {} {}", response.url().path(), status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (message, explained) = failure_message(status, &body);
        Err(CoreError::RemoteFailure {
            status: Some(status.as_u16()),
            message,
            explained,
        })
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> CoreResult<T> {
        let response = self.dispatch(request).await?;
        let status = response.status();
        response.json::<T>().await.map_err(|e| {
            warn!("Could not decode upstream response: {}", e);
            CoreError::RemoteFailure {
                status: Some(status.as_u16()),
                message: UNEXPECTED_RESPONSE_MESSAGE.to_string(),
                explained: false,
            }
        })
    }

    async fn send_empty(&self, request: RequestBuilder) -> CoreResult<()> {
        self.dispatch(request).await.map(|_| ())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Message { message: String },
    Error { error: String },
    Text(String),
}

/// Best text for a failed response, and whether it was the upstream's own
/// `message` field.
fn failure_message(status: StatusCode, body: &str) -> (String, bool) {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Message { message }) => (message, true),
        Ok(ErrorBody::Error { error }) => (error, false),
        Ok(ErrorBody::Text(text)) => (text, false),
        Err(_) if !body.trim().is_empty() => (body.trim().to_string(), false),
        Err(_) => (format!("Request failed with status {}", status.as_u16()), false),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BookedSeats {
    List(Vec<String>),
    #[serde(rename_all = "camelCase")]
    Wrapped { booked_seats: Vec<String> },
}

#[async_trait]
impl FlightService for ApiClient {
    async fn list_flights(&self) -> CoreResult<Vec<Flight>> {
        self.send(self.http.get(self.url("flights"))).await
    }

    async fn search_flights(&self, query: &FlightSearch) -> CoreResult<Vec<Flight>> {
        let query = query.clone().normalized();
        self.send(self.http.get(self.url("flights/search")).query(&query)).await
    }

    async fn get_flight(&self, flight_id: &str) -> CoreResult<Flight> {
        self.send(self.http.get(self.url(&format!("flights/{}", flight_id)))).await
    }

    async fn taken_seats(&self, flight_id: &str) -> CoreResult<TakenSeats> {
        let request = self.http.get(self.url(&format!("flights/{}/booked-seats", flight_id)));
        match self.send::<BookedSeats>(request).await {
            Ok(BookedSeats::List(seats)) | Ok(BookedSeats::Wrapped { booked_seats: seats }) => {
                Ok(TakenSeats::from_labels(seats))
            }
            Err(CoreError::RemoteFailure { status: Some(404), .. }) => {
                debug!("No seat occupancy published for flight {}", flight_id);
                Ok(TakenSeats::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl BookingService for ApiClient {
    async fn create_booking(
        &self,
        token: Option<&AccessToken>,
        booking: &CreateBooking,
    ) -> CoreResult<BookingConfirmation> {
        let request = Self::authorized(self.http.post(self.url("bookings")), token).json(booking);
        self.send(request).await
    }

    async fn user_bookings(&self, token: &AccessToken) -> CoreResult<Vec<BookingRecord>> {
        let request = Self::authorized(self.http.get(self.url("bookings/user")), Some(token));
        self.send(request).await
    }

    async fn cancel_booking(&self, token: &AccessToken, booking_id: &str) -> CoreResult<()> {
        let url = self.url(&format!("bookings/{}", booking_id));
        self.send_empty(Self::authorized(self.http.delete(url), Some(token))).await
    }
}

#[async_trait]
impl FeedbackService for ApiClient {
    async fn submit_feedback(&self, token: Option<&AccessToken>, feedback: &Feedback) -> CoreResult<Feedback> {
        let request = Self::authorized(self.http.post(self.url("feedback")), token).json(feedback);
        self.send(request).await
    }

    async fn user_feedback(&self, token: &AccessToken) -> CoreResult<Vec<Feedback>> {
        let request = Self::authorized(self.http.get(self.url("feedback/user")), Some(token));
        self.send(request).await
    }
}

#[async_trait]
impl AuthService for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> CoreResult<AuthResponse> {
        self.send(self.http.post(self.url("users/register")).json(request)).await
    }

    async fn login(&self, request: &LoginRequest) -> CoreResult<AuthResponse> {
        self.send(self.http.post(self.url("users/login")).json(request)).await
    }

    async fn me(&self, token: &AccessToken) -> CoreResult<User> {
        self.send(Self::authorized(self.http.get(self.url("users/me")), Some(token))).await
    }

    async fn change_password(&self, token: &AccessToken, request: &ChangePasswordRequest) -> CoreResult<()> {
        let put = self.http.put(self.url("users/change-password")).json(request);
        self.send_empty(Self::authorized(put, Some(token))).await
    }
}
