use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub flight_id: String,
    /// Cabin label as the upstream API spells it, e.g. "Economy Class".
    pub class_type: String,
    pub seat_number: String,
}

/// Response of a successful `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking: BookingDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    /// Anything else the API sends is passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One row of the user's booking history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub booking_number: String,
    pub flight_from: String,
    pub flight_to: String,
    pub date: NaiveDate,
    pub seat_number: String,
    #[serde(rename = "class")]
    pub cabin_class: String,
    pub status: BookingStatus,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Confirmed,
    Upcoming,
    Cancelled,
    Other(String),
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Confirmed" => Self::Confirmed,
            "Upcoming" => Self::Upcoming,
            "Cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(value: BookingStatus) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => f.write_str("Confirmed"),
            Self::Upcoming => f.write_str("Upcoming"),
            Self::Cancelled => f.write_str("Cancelled"),
            Self::Other(s) => f.write_str(s),
        }
    }
}
