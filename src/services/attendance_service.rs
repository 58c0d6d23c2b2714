use sqlx::SqlitePool;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::attendance_log::{AttendanceLog, AttendanceLogWithStudent, AttendanceStatus};

#[derive(Clone)]
pub struct AttendanceService {
    pool: SqlitePool,
}

impl AttendanceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Live attendance list for an event, newest check-in first.
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<AttendanceLogWithStudent>> {
        let logs = sqlx::query_as::<_, AttendanceLogWithStudent>(
            "SELECT al.id, al.roll_no, al.event_id, al.check_in_time, al.check_out_time, \
                    al.duration_minutes, al.status, \
                    s.name AS student_name, s.department, s.year \
             FROM attendance_logs al \
             JOIN students s ON al.roll_no = s.roll_no \
             WHERE al.event_id = ? \
             ORDER BY al.check_in_time DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn get_by_id(&self, log_id: i64) -> Result<AttendanceLog> {
        sqlx::query_as::<_, AttendanceLog>("SELECT * FROM attendance_logs WHERE id = ?")
            .bind(log_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Attendance record not found".to_string()))
    }

    /// Administrative escape hatch: overwrites status only, bypassing the
    /// duration rule. Timestamps and duration are never touched, and event
    /// activity is deliberately not checked.
    pub async fn override_status(
        &self,
        log_id: i64,
        status: AttendanceStatus,
    ) -> Result<AttendanceLog> {
        self.get_by_id(log_id).await?;

        sqlx::query("UPDATE attendance_logs SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(log_id)
            .execute(&self.pool)
            .await?;

        info!(log_id, status = status.as_str(), "attendance status overridden");
        self.get_by_id(log_id).await
    }
}
