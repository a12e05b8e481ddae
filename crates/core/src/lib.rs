pub mod api;
pub mod capture;
pub mod diagnostics;
pub mod shared;
pub mod vision;
