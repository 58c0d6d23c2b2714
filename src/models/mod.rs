pub mod admin;
pub mod attendance_log;
pub mod event;
pub mod student;
