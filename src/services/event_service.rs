use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::dto::event_dto::{CreateEventPayload, EventStatsResponse, UpdateEventPayload};
use crate::error::{Error, Result};
use crate::models::event::Event;

#[derive(Clone)]
pub struct EventService {
    pool: SqlitePool,
}

impl EventService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateEventPayload) -> Result<Event> {
        let session_token = Uuid::new_v4().to_string();
        let min_percent = payload.min_attendance_percent.unwrap_or(75.0);

        let id = sqlx::query(
            "INSERT INTO events \
             (title, description, event_date, start_time, end_time, duration_minutes, \
              min_attendance_percent, session_token) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.title)
        .bind(payload.description.as_deref().unwrap_or(""))
        .bind(&payload.event_date)
        .bind(&payload.start_time)
        .bind(&payload.end_time)
        .bind(payload.duration_minutes)
        .bind(min_percent)
        .bind(&session_token)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events ORDER BY event_date DESC, start_time DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Event> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))
    }

    pub async fn update(&self, id: i64, payload: UpdateEventPayload) -> Result<Event> {
        self.get_by_id(id).await?;

        sqlx::query(
            "UPDATE events SET \
             title = COALESCE(?, title), \
             description = COALESCE(?, description), \
             event_date = COALESCE(?, event_date), \
             start_time = COALESCE(?, start_time), \
             end_time = COALESCE(?, end_time), \
             duration_minutes = COALESCE(?, duration_minutes), \
             min_attendance_percent = COALESCE(?, min_attendance_percent), \
             is_active = COALESCE(?, is_active) \
             WHERE id = ?",
        )
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.event_date)
        .bind(payload.start_time)
        .bind(payload.end_time)
        .bind(payload.duration_minutes)
        .bind(payload.min_attendance_percent)
        .bind(payload.is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Deleting an event cascades to its attendance logs.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM attendance_logs WHERE event_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Point-in-time counts; reflects committed ledger state at query time.
    pub async fn stats(&self, id: i64) -> Result<EventStatsResponse> {
        let event = self.get_by_id(id).await?;

        let count = |status: &'static str| {
            let pool = self.pool.clone();
            async move {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM attendance_logs WHERE event_id = ? AND status = ?",
                )
                .bind(id)
                .bind(status)
                .fetch_one(&pool)
                .await
            }
        };

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance_logs WHERE event_id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(EventStatsResponse {
            event_id: event.id,
            title: event.title,
            total_scans: total,
            present: count("PRESENT").await?,
            absent: count("ABSENT").await?,
            pending: count("PENDING").await?,
        })
    }

    /// Closes an event: every PENDING log becomes ABSENT and the event stops
    /// accepting scans. Finalizing an already-finalized event transitions
    /// zero records. Does not require the event to still be active.
    pub async fn finalize(&self, id: i64) -> Result<u64> {
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        let finalized = sqlx::query(
            "UPDATE attendance_logs SET status = 'ABSENT' \
             WHERE event_id = ? AND status = 'PENDING'",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("UPDATE events SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(event_id = id, finalized, "event finalized");
        Ok(finalized)
    }
}
