use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub roll_no: String,
    pub name: String,
    pub department: Option<String>,
    pub year: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
}
