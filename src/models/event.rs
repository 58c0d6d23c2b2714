use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bounded attendance window. `is_active` gates new scans and is flipped
/// to false exactly once by finalization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub min_attendance_percent: f64,
    pub session_token: String,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Event {
    /// Presence threshold in minutes: `duration_minutes * min_attendance_percent / 100`.
    pub fn required_minutes(&self) -> f64 {
        self.duration_minutes as f64 * self.min_attendance_percent / 100.0
    }
}
