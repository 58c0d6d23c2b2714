use sqlx::SqlitePool;
use tracing::info;

use crate::dto::student_dto::{BulkImportPayload, BulkImportResponse, CreateStudentPayload};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::student::Student;
use crate::utils::validation::normalize_roll_no;

#[derive(Clone)]
pub struct StudentService {
    pool: SqlitePool,
}

impl StudentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateStudentPayload) -> Result<Student> {
        let clean_roll_no = normalize_roll_no(&payload.roll_no);
        if clean_roll_no.is_empty() {
            return Err(Error::BadRequest("roll_no and name are required".to_string()));
        }

        let inserted = sqlx::query(
            "INSERT INTO students (roll_no, name, department, year) VALUES (?, ?, ?, ?)",
        )
        .bind(&clean_roll_no)
        .bind(payload.name.trim())
        .bind(&payload.department)
        .bind(payload.year)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => self.get_by_roll_no(&clean_roll_no).await,
            Err(err) if is_unique_violation(&err) => Err(Error::Conflict(format!(
                "Student with roll number {} already exists",
                clean_roll_no
            ))),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn list(&self, search: Option<String>) -> Result<Vec<Student>> {
        let students = match search {
            Some(term) if !term.trim().is_empty() => {
                let pattern = format!("%{}%", term.trim());
                sqlx::query_as::<_, Student>(
                    "SELECT * FROM students WHERE roll_no LIKE ? OR name LIKE ? ORDER BY roll_no",
                )
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY roll_no")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(students)
    }

    pub async fn get_by_roll_no(&self, roll_no: &str) -> Result<Student> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE roll_no = ?")
            .bind(roll_no)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Student not found".to_string()))
    }

    /// Invalid or duplicate rows are skipped, never fatal to the batch.
    pub async fn bulk_import(&self, payload: BulkImportPayload) -> Result<BulkImportResponse> {
        if payload.students.is_empty() {
            return Err(Error::BadRequest(
                "Provide an array of students with roll_no and name".to_string(),
            ));
        }

        let mut added = 0u32;
        let mut skipped = 0u32;

        for row in payload.students {
            let (Some(roll_no), Some(name)) = (row.roll_no, row.name) else {
                skipped += 1;
                continue;
            };
            let clean_roll_no = normalize_roll_no(&roll_no);
            if clean_roll_no.is_empty() || name.trim().is_empty() {
                skipped += 1;
                continue;
            }

            let inserted = sqlx::query(
                "INSERT INTO students (roll_no, name, department, year) VALUES (?, ?, ?, ?)",
            )
            .bind(&clean_roll_no)
            .bind(name.trim())
            .bind(&row.department)
            .bind(row.year)
            .execute(&self.pool)
            .await;

            match inserted {
                Ok(_) => added += 1,
                Err(err) if is_unique_violation(&err) => skipped += 1,
                Err(err) => return Err(err.into()),
            }
        }

        info!(added, skipped, "bulk student import finished");
        Ok(BulkImportResponse {
            message: format!(
                "Imported {} students, skipped {} (duplicates or invalid)",
                added, skipped
            ),
            added,
            skipped,
        })
    }

    /// Ledger rows referencing the student are left in place; referential
    /// integrity on deletion is not guarded here.
    pub async fn delete(&self, roll_no: &str) -> Result<()> {
        let clean_roll_no = normalize_roll_no(roll_no);
        self.get_by_roll_no(&clean_roll_no).await?;

        sqlx::query("DELETE FROM students WHERE roll_no = ?")
            .bind(&clean_roll_no)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
