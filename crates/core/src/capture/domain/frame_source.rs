use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("device {device} unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },
    #[error("capture source is not open")]
    NotOpen,
    #[error("no frame received: {0}")]
    NoFrame(String),
}

/// A device (or stand-in) that yields single frames on demand.
///
/// Mirrors a video-capture handle: callers `open`, `read` one or more
/// frames, then `release`. Checks acquire and release the source within a
/// single check so the device is never held across a network call.
pub trait FrameSource {
    /// Human-readable name of the underlying device, for log lines.
    fn describe(&self) -> String;

    /// Acquires the device. Fails with [`CaptureError::DeviceUnavailable`]
    /// when it cannot be opened.
    fn open(&mut self) -> Result<(), CaptureError>;

    fn is_open(&self) -> bool;

    /// Reads one frame. Must be called between `open` and `release`.
    fn read(&mut self) -> Result<Frame, CaptureError>;

    /// Releases the device. Calling it on a closed source is a no-op.
    fn release(&mut self);
}
