use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feedback entry; `id` and `created_at` are only present on records read
/// back from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub rating: u8,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Feedback {
    pub fn new(rating: u8, comment: impl Into<String>) -> Self {
        Self {
            id: None,
            rating,
            comment: comment.into(),
            created_at: None,
        }
    }
}
