use crate::capture::domain::frame_source::FrameSource;
use crate::capture::infrastructure::frame_encoder::encode_frame_base64;
use crate::diagnostics::check_outcome::CheckFailure;

/// Captures exactly one frame and returns it as base64 JPEG.
///
/// The source is released before this returns, whether or not the read
/// succeeded, so no device is held during the network call that follows.
pub(crate) fn capture_frame_data(source: &mut dyn FrameSource) -> Result<String, CheckFailure> {
    if let Err(err) = source.open() {
        log::debug!("{}: {err}", source.describe());
        return Err(err.into());
    }
    let read = source.read();
    source.release();

    let frame = read.map_err(|err| {
        log::debug!("{}: {err}", source.describe());
        CheckFailure::from(err)
    })?;
    if frame.is_empty() {
        return Err(CheckFailure::CaptureFailed);
    }

    encode_frame_base64(&frame).map_err(|e| CheckFailure::Other(e.to_string()))
}

/// Operator-facing text for a failed frame submission to `label`.
pub(crate) fn submission_failure_message(label: &str, failure: &CheckFailure) -> String {
    match failure {
        CheckFailure::DeviceUnavailable | CheckFailure::CaptureFailed => failure.to_string(),
        CheckFailure::ConnectionRefused => {
            "Backend server not running. Please start the server first.".to_string()
        }
        CheckFailure::UnexpectedStatus(code) => format!("{label} Failed: {code}"),
        CheckFailure::Timeout(detail) => format!("Test failed: timed out ({detail})"),
        CheckFailure::Other(detail) => format!("Test failed: {detail}"),
    }
}
