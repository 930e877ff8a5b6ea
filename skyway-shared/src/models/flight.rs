use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled flight as listed by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "_id")]
    pub id: String,
    pub from: String,
    pub to: String,
    pub depart_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flight_type: String,
    // Prices may be absent on partially populated records.
    #[serde(default)]
    pub economy_class_price: Option<f64>,
    #[serde(default)]
    pub business_class_price: Option<f64>,
    #[serde(default)]
    pub first_class_price: Option<f64>,
}

impl Flight {
    pub fn is_return(&self) -> bool {
        self.flight_type.eq_ignore_ascii_case("return")
    }

    /// Return date shown for round trips only.
    pub fn return_leg(&self) -> Option<DateTime<Utc>> {
        if self.is_return() {
            self.return_date
        } else {
            None
        }
    }
}

/// Query for `GET /flights/search`. Unset fields are left out of the query
/// string entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depart_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_type: Option<String>,
}

impl FlightSearch {
    /// Drops blank text fields so they are not sent as `from=`.
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(value: &mut Option<String>) {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *value = None;
            }
        }
        blank_to_none(&mut self.from);
        blank_to_none(&mut self.to);
        blank_to_none(&mut self.flight_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_deserialization() {
        let json = r#"
            {
                "_id": "65f1c2",
                "from": "New York",
                "to": "London",
                "departDate": "2024-03-20T10:00:00Z",
                "returnDate": "2024-03-27T10:00:00Z",
                "flightType": "Return",
                "economyClassPrice": 500,
                "businessClassPrice": 800,
                "firstClassPrice": 1200
            }
        "#;
        let flight: Flight = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(flight.id, "65f1c2");
        assert!(flight.is_return());
        assert!(flight.return_leg().is_some());
        assert_eq!(flight.first_class_price, Some(1200.0));
    }

    #[test]
    fn test_one_way_hides_return_date() {
        let json = r#"
            {
                "_id": "1",
                "from": "Paris",
                "to": "Dubai",
                "departDate": "2024-05-01T08:00:00Z",
                "returnDate": "2024-05-09T08:00:00Z",
                "flightType": "One Way"
            }
        "#;
        let flight: Flight = serde_json::from_str(json).unwrap();
        assert_eq!(flight.return_leg(), None);
        assert_eq!(flight.economy_class_price, None);
    }

    #[test]
    fn test_search_skips_empty_fields() {
        let search = FlightSearch {
            from: Some("London".to_string()),
            to: Some("  ".to_string()),
            ..Default::default()
        }
        .normalized();

        let value = serde_json::to_value(&search).unwrap();
        assert_eq!(value, serde_json::json!({ "from": "London" }));
    }
}
