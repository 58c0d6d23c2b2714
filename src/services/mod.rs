pub mod attendance_service;
pub mod auth_service;
pub mod event_service;
pub mod export_service;
pub mod scan_service;
pub mod student_service;
