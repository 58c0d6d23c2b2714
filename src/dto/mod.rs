pub mod attendance_dto;
pub mod auth_dto;
pub mod event_dto;
pub mod scan_dto;
pub mod student_dto;
