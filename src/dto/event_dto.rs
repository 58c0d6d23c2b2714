use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub event_date: String,
    #[validate(length(min = 1))]
    pub start_time: String,
    #[validate(length(min = 1))]
    pub end_time: String,
    #[validate(range(min = 1))]
    pub duration_minutes: i64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_attendance_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEventPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_attendance_percent: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventStatsResponse {
    pub event_id: i64,
    pub title: String,
    pub total_scans: i64,
    pub present: i64,
    pub absent: i64,
    pub pending: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalizeResponse {
    pub message: String,
    pub finalized_count: u64,
}
