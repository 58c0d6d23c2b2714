use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::attendance_log::AttendanceLogWithStudent;
use crate::models::event::Event;

pub struct CsvExport {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Clone)]
pub struct ExportService {
    pool: SqlitePool,
}

impl ExportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attendance report for one event: ledger joined with student identity,
    /// ordered by roll number.
    pub async fn export_event_csv(&self, event: &Event) -> Result<CsvExport> {
        let rows = sqlx::query_as::<_, AttendanceLogWithStudent>(
            "SELECT al.id, al.roll_no, al.event_id, al.check_in_time, al.check_out_time, \
                    al.duration_minutes, al.status, \
                    s.name AS student_name, s.department, s.year \
             FROM attendance_logs al \
             JOIN students s ON al.roll_no = s.roll_no \
             WHERE al.event_id = ? \
             ORDER BY al.roll_no",
        )
        .bind(event.id)
        .fetch_all(&self.pool)
        .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "Roll No",
                "Student Name",
                "Department",
                "Year",
                "Check-In Time",
                "Check-Out Time",
                "Duration (min)",
                "Status",
            ])
            .map_err(|e| Error::Internal(e.to_string()))?;

        for row in rows {
            let year = row.year.map(|y| y.to_string()).unwrap_or_default();
            let check_in = row.check_in_time.to_rfc3339();
            let check_out = row
                .check_out_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();
            let duration = row
                .duration_minutes
                .map(|d| d.to_string())
                .unwrap_or_default();

            writer
                .write_record([
                    row.roll_no.as_str(),
                    row.student_name.as_str(),
                    row.department.as_deref().unwrap_or(""),
                    year.as_str(),
                    check_in.as_str(),
                    check_out.as_str(),
                    duration.as_str(),
                    row.status.as_str(),
                ])
                .map_err(|e| Error::Internal(e.to_string()))?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| Error::Internal(e.to_string()))?;

        let filename = format!(
            "attendance_{}_{}.csv",
            event.title.split_whitespace().collect::<Vec<_>>().join("_"),
            event.event_date
        );

        Ok(CsvExport { filename, data })
    }
}
