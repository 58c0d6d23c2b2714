pub mod attendance;
pub mod auth;
pub mod events;
pub mod health;
pub mod scan;
pub mod students;
