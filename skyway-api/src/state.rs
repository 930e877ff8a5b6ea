use std::sync::Arc;

use skyway_core::services::{AuthService, BookingService, FeedbackService, FlightService};
use skyway_store::ApiClient;

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn FlightService>,
    pub bookings: Arc<dyn BookingService>,
    pub feedback: Arc<dyn FeedbackService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppState {
    /// Every service backed by the one upstream client.
    pub fn from_client(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            flights: client.clone(),
            bookings: client.clone(),
            feedback: client.clone(),
            auth: client,
        }
    }
}
