pub mod attendance_api;
pub mod messages;
