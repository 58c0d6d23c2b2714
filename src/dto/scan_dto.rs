use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub roll_no: String,
    pub event_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub action: &'static str,
    pub roll_no: String,
    pub student_name: String,
    pub department: Option<String>,
    pub check_in_time: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutResponse {
    pub action: &'static str,
    pub roll_no: String,
    pub student_name: String,
    pub department: Option<String>,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: DateTime<Utc>,
    pub duration_minutes: f64,
    pub required_minutes: f64,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateBlockedResponse {
    pub action: &'static str,
    pub roll_no: String,
    pub student_name: String,
    pub status: String,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<f64>,
    pub message: String,
}
