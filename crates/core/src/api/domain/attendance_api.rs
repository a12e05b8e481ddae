use std::time::Duration;

use thiserror::Error;

use crate::api::domain::messages::{AttendanceRequest, RegistrationRequest, ServiceReply};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("{0}")]
    Request(String),
}

/// A status endpoint probed with `GET` during the reachability check.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub path: &'static str,
    pub description: &'static str,
}

impl Endpoint {
    pub const fn new(path: &'static str, description: &'static str) -> Self {
        Self {
            path,
            description,
        }
    }
}

/// Client side of the attendance backend's HTTP contract.
///
/// Only an exact 200 counts as success; every other status comes back as
/// [`ApiError::UnexpectedStatus`].
pub trait AttendanceApi {
    fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> Result<(), ApiError>;

    fn register_face(&self, request: &RegistrationRequest) -> Result<ServiceReply, ApiError>;

    fn process_attendance(&self, request: &AttendanceRequest) -> Result<ServiceReply, ApiError>;
}
