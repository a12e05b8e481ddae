use thiserror::Error;

use crate::api::domain::attendance_api::ApiError;
use crate::capture::domain::frame_source::CaptureError;

/// Why a check did not pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckFailure {
    #[error("Camera not available")]
    DeviceUnavailable,
    #[error("Failed to capture frame")]
    CaptureFailed,
    #[error("Server not running")]
    ConnectionRefused,
    #[error("{0}")]
    UnexpectedStatus(u16),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
}

impl From<ApiError> for CheckFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Connection(_) => CheckFailure::ConnectionRefused,
            ApiError::UnexpectedStatus(code) => CheckFailure::UnexpectedStatus(code),
            ApiError::Timeout(detail) => CheckFailure::Timeout(detail),
            other => CheckFailure::Other(other.to_string()),
        }
    }
}

impl From<CaptureError> for CheckFailure {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::DeviceUnavailable { .. } => CheckFailure::DeviceUnavailable,
            CaptureError::NotOpen | CaptureError::NoFrame(_) => CheckFailure::CaptureFailed,
        }
    }
}

/// Result of a single check. Checks never panic or propagate errors; they
/// report through this value instead.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckOutcome {
    Passed { message: Option<String> },
    Failed(CheckFailure),
}

impl CheckOutcome {
    pub fn passed() -> Self {
        CheckOutcome::Passed { message: None }
    }

    pub fn passed_with(message: impl Into<String>) -> Self {
        CheckOutcome::Passed {
            message: Some(message.into()),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed { .. })
    }

    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            CheckOutcome::Failed(failure) => Some(failure),
            CheckOutcome::Passed { .. } => None,
        }
    }
}

impl From<Result<(), CheckFailure>> for CheckOutcome {
    fn from(result: Result<(), CheckFailure>) -> Self {
        match result {
            Ok(()) => CheckOutcome::passed(),
            Err(failure) => CheckOutcome::Failed(failure),
        }
    }
}
