use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// At most one log exists per (roll_no, event_id) pair; the scan engine's
/// whole state machine rests on that uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceLog {
    pub id: i64,
    pub roll_no: String,
    pub event_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<f64>,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Log row joined with student identity, for listings and export.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceLogWithStudent {
    pub id: i64,
    pub roll_no: String,
    pub event_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<f64>,
    pub status: String,
    pub student_name: String,
    pub department: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Pending,
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Pending => "PENDING",
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(AttendanceStatus::Pending),
            "PRESENT" => Ok(AttendanceStatus::Present),
            "ABSENT" => Ok(AttendanceStatus::Absent),
            other => Err(format!("Status must be PRESENT, ABSENT, or PENDING, got: {}", other)),
        }
    }
}
