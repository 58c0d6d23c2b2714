pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    attendance_service::AttendanceService, auth_service::AuthService, event_service::EventService,
    export_service::ExportService, scan_service::ScanService, student_service::StudentService,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub scan_service: ScanService,
    pub event_service: EventService,
    pub student_service: StudentService,
    pub attendance_service: AttendanceService,
    pub export_service: ExportService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let scan_service = ScanService::new(pool.clone());
        let event_service = EventService::new(pool.clone());
        let student_service = StudentService::new(pool.clone());
        let attendance_service = AttendanceService::new(pool.clone());
        let export_service = ExportService::new(pool.clone());
        let auth_service = AuthService::new(pool.clone());

        Self {
            pool,
            scan_service,
            event_service,
            student_service,
            attendance_service,
            export_service,
            auth_service,
        }
    }
}
