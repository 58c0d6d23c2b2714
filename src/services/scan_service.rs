use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::dto::scan_dto::{CheckInResponse, CheckOutResponse, DuplicateBlockedResponse};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::attendance_log::{AttendanceLog, AttendanceStatus};
use crate::models::event::Event;
use crate::models::student::Student;
use crate::utils::time::{elapsed_minutes, Clock, SystemClock};
use crate::utils::validation::normalize_roll_no;

/// The three terminal outcomes of a scan. Which one fires is decided purely
/// by ledger state; the scanning client stays stateless.
#[derive(Debug)]
pub enum ScanOutcome {
    CheckIn(CheckInResponse),
    CheckOut(CheckOutResponse),
    DuplicateBlocked(DuplicateBlockedResponse),
}

/// Explicit state of the (roll_no, event_id) ledger entry, derived from
/// entry existence and check_out_time presence.
enum LedgerState {
    NoEntry,
    CheckedIn(AttendanceLog),
    Resolved(AttendanceLog),
}

impl From<Option<AttendanceLog>> for LedgerState {
    fn from(entry: Option<AttendanceLog>) -> Self {
        match entry {
            None => LedgerState::NoEntry,
            Some(log) if log.check_out_time.is_none() => LedgerState::CheckedIn(log),
            Some(log) => LedgerState::Resolved(log),
        }
    }
}

#[derive(Clone)]
pub struct ScanService {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl ScanService {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Core attendance engine: first scan checks in, second checks out and
    /// resolves presence, anything after that is blocked.
    pub async fn process_scan(&self, roll_no: &str, event_id: i64) -> Result<ScanOutcome> {
        let clean_roll_no = normalize_roll_no(roll_no);
        if clean_roll_no.is_empty() || event_id <= 0 {
            return Err(Error::BadRequest(
                "roll_no and event_id are required".to_string(),
            ));
        }

        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

        if !event.is_active {
            return Err(Error::EventInactive);
        }

        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE roll_no = ?")
            .bind(&clean_roll_no)
            .fetch_optional(&self.pool)
            .await?;
        let Some(student) = student else {
            warn!(roll_no = %clean_roll_no, event_id, "scan attempt for unregistered student");
            return Err(Error::StudentNotFound(clean_roll_no));
        };

        // Two passes: a scan that loses a same-pair race re-reads the ledger
        // and lands in whichever branch the winner produced.
        for _ in 0..2 {
            if let Some(outcome) = self.try_scan(&clean_roll_no, &event, &student).await? {
                return Ok(outcome);
            }
        }
        Err(Error::Conflict("Duplicate scan detected".to_string()))
    }

    /// One transactional attempt. Returns `None` when a concurrent scan for
    /// the same pair got there first and the branch no longer applies.
    async fn try_scan(
        &self,
        roll_no: &str,
        event: &Event,
        student: &Student,
    ) -> Result<Option<ScanOutcome>> {
        let mut tx = self.pool.begin().await?;

        let entry = sqlx::query_as::<_, AttendanceLog>(
            "SELECT * FROM attendance_logs WHERE roll_no = ? AND event_id = ?",
        )
        .bind(roll_no)
        .bind(event.id)
        .fetch_optional(&mut *tx)
        .await?;

        match LedgerState::from(entry) {
            LedgerState::NoEntry => {
                let now = self.clock.now();
                let inserted = sqlx::query(
                    "INSERT INTO attendance_logs (roll_no, event_id, check_in_time, status) \
                     VALUES (?, ?, ?, 'PENDING')",
                )
                .bind(roll_no)
                .bind(event.id)
                .bind(now)
                .execute(&mut *tx)
                .await;

                match inserted {
                    Ok(_) => {
                        tx.commit().await?;
                        info!(roll_no, event_id = event.id, "check-in recorded");
                        Ok(Some(ScanOutcome::CheckIn(CheckInResponse {
                            action: "CHECK_IN",
                            roll_no: roll_no.to_string(),
                            student_name: student.name.clone(),
                            department: student.department.clone(),
                            check_in_time: now,
                            message: format!("{} checked in successfully", student.name),
                        })))
                    }
                    Err(err) if is_unique_violation(&err) => {
                        tx.rollback().await?;
                        Ok(None)
                    }
                    Err(err) => Err(err.into()),
                }
            }
            LedgerState::CheckedIn(log) => {
                let now = self.clock.now();
                let duration_minutes = elapsed_minutes(log.check_in_time, now);
                let required_minutes = event.required_minutes();
                // Meeting the threshold exactly counts as present.
                let status = if duration_minutes >= required_minutes {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                };

                let updated = sqlx::query(
                    "UPDATE attendance_logs \
                     SET check_out_time = ?, duration_minutes = ?, status = ? \
                     WHERE id = ? AND check_out_time IS NULL",
                )
                .bind(now)
                .bind(duration_minutes)
                .bind(status.as_str())
                .bind(log.id)
                .execute(&mut *tx)
                .await?;

                if updated.rows_affected() == 0 {
                    tx.rollback().await?;
                    return Ok(None);
                }
                tx.commit().await?;

                info!(
                    roll_no,
                    event_id = event.id,
                    duration_minutes,
                    status = status.as_str(),
                    "check-out recorded"
                );

                let message = match status {
                    AttendanceStatus::Present => {
                        format!("{} - PRESENT ({:.1} min)", student.name, duration_minutes)
                    }
                    _ => format!(
                        "{} - ABSENT ({:.1} min < {:.1} min required)",
                        student.name, duration_minutes, required_minutes
                    ),
                };

                Ok(Some(ScanOutcome::CheckOut(CheckOutResponse {
                    action: "CHECK_OUT",
                    roll_no: roll_no.to_string(),
                    student_name: student.name.clone(),
                    department: student.department.clone(),
                    check_in_time: log.check_in_time,
                    check_out_time: now,
                    duration_minutes,
                    required_minutes,
                    status: status.to_string(),
                    message,
                })))
            }
            LedgerState::Resolved(log) => {
                // Terminal state: nothing mutates, full prior state goes back.
                tx.rollback().await?;
                Ok(Some(ScanOutcome::DuplicateBlocked(DuplicateBlockedResponse {
                    action: "DUPLICATE_BLOCKED",
                    roll_no: roll_no.to_string(),
                    student_name: student.name.clone(),
                    status: log.status,
                    check_in_time: log.check_in_time,
                    check_out_time: log.check_out_time,
                    duration_minutes: log.duration_minutes,
                    message: format!(
                        "{} has already checked in and out for this event",
                        student.name
                    ),
                })))
            }
        }
    }
}
