use serde::{Deserialize, Serialize};

/// Body of `POST /face/register`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegistrationRequest {
    pub user_id: String,
    pub frame_data: String,
}

/// Body of `POST /attendance/process`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttendanceRequest {
    pub frame_data: String,
    pub user_session: SessionDescriptor,
}

/// Correlates an attendance request with a client session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionDescriptor {
    /// Wall-clock Unix time in seconds.
    pub timestamp: f64,
    pub session_id: String,
}

/// JSON body returned by the backend on status 200.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ServiceReply {
    pub message: String,
    #[serde(default)]
    pub data: Option<AttendanceData>,
}

/// Per-frame analysis attached to an attendance reply.
///
/// Every field is optional on the wire; the accessors fall back to
/// zero/false so a partially populated report still prints.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AttendanceData {
    #[serde(default)]
    pub face_detected: Option<bool>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub eyes_detected: Option<u32>,
    #[serde(default)]
    pub liveness_score: Option<f64>,
    #[serde(default)]
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl AttendanceData {
    /// True when the backend sent a `data` object with none of the known
    /// fields, e.g. `{}`.
    pub fn is_empty(&self) -> bool {
        self.face_detected.is_none()
            && self.confidence.is_none()
            && self.eyes_detected.is_none()
            && self.liveness_score.is_none()
            && self.processing_time.is_none()
            && self.user_id.is_none()
    }

    pub fn face_detected(&self) -> bool {
        self.face_detected.unwrap_or(false)
    }

    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }

    pub fn eyes_detected(&self) -> u32 {
        self.eyes_detected.unwrap_or(0)
    }

    pub fn liveness_score(&self) -> f64 {
        self.liveness_score.unwrap_or(0.0)
    }

    pub fn processing_time(&self) -> f64 {
        self.processing_time.unwrap_or(0.0)
    }
}
