use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentPayload {
    #[validate(length(min = 1))]
    pub roll_no: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub department: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentListQuery {
    pub search: Option<String>,
}

/// Rows in a bulk import are not validated up front; invalid or duplicate
/// entries are counted as skipped rather than failing the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkImportPayload {
    pub students: Vec<BulkStudentRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkStudentRow {
    pub roll_no: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkImportResponse {
    pub message: String,
    pub added: u32,
    pub skipped: u32,
}
