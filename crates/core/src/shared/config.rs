use std::path::PathBuf;

use crate::api::domain::attendance_api::Endpoint;
use crate::shared::constants::{
    DEFAULT_BASE_URL, DEFAULT_CAMERA_INDEX, DEFAULT_TEST_SESSION_ID, DEFAULT_TEST_USER_ID,
};

/// Runtime settings for a full system check.
///
/// `Default` reproduces the fixed local setup: backend on
/// `localhost:8000`, camera 0, and the stock test user/session.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticConfig {
    pub base_url: String,
    pub camera_index: u32,
    pub user_id: String,
    pub session_id: String,
    pub cascade_dir: Option<PathBuf>,
    pub endpoints: Vec<Endpoint>,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            camera_index: DEFAULT_CAMERA_INDEX,
            user_id: DEFAULT_TEST_USER_ID.to_string(),
            session_id: DEFAULT_TEST_SESSION_ID.to_string(),
            cascade_dir: None,
            endpoints: status_endpoints(),
        }
    }
}

impl DiagnosticConfig {
    /// Appends the admin dashboard endpoints to the reachability list.
    pub fn with_admin_endpoints(mut self) -> Self {
        self.endpoints.extend(admin_endpoints());
        self
    }
}

pub fn status_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("/", "Root endpoint"),
        Endpoint::new("/health", "Health check"),
        Endpoint::new("/attendance/stats", "Attendance stats"),
    ]
}

pub fn admin_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("/admin/dashboard", "Admin dashboard"),
        Endpoint::new("/admin/attendance/all", "Admin attendance records"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_backend() {
        let config = DiagnosticConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.camera_index, 0);
        assert_eq!(config.user_id, "test_user_001");
        assert_eq!(config.session_id, "test_session_001");
        assert!(config.cascade_dir.is_none());
    }

    #[test]
    fn test_default_endpoints_are_status_gets() {
        let paths: Vec<_> = DiagnosticConfig::default()
            .endpoints
            .iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(paths, vec!["/", "/health", "/attendance/stats"]);
    }

    #[test]
    fn test_with_admin_endpoints_appends_after_status_endpoints() {
        let config = DiagnosticConfig::default().with_admin_endpoints();
        assert_eq!(config.endpoints.len(), 5);
        assert_eq!(config.endpoints[0].path, "/");
        assert_eq!(config.endpoints[3].path, "/admin/dashboard");
        assert_eq!(config.endpoints[4].path, "/admin/attendance/all");
    }
}
