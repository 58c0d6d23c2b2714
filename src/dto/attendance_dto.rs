use crate::models::{
    attendance_log::{AttendanceLog, AttendanceLogWithStudent},
    event::Event,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct OverridePayload {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverrideResponse {
    pub message: String,
    pub attendance: AttendanceLog,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceListResponse {
    pub event: Event,
    pub attendance: Vec<AttendanceLogWithStudent>,
}
