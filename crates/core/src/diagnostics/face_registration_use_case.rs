use crate::api::domain::attendance_api::AttendanceApi;
use crate::api::domain::messages::RegistrationRequest;
use crate::capture::domain::frame_source::FrameSource;
use crate::diagnostics::check_outcome::{CheckFailure, CheckOutcome};
use crate::diagnostics::frame_submission::{capture_frame_data, submission_failure_message};
use crate::diagnostics::reporter::{DiagnosticReporter, Line};

const LABEL: &str = "Face Registration";

/// Captures one frame and registers it for the test user.
pub struct FaceRegistrationUseCase {
    user_id: String,
}

impl FaceRegistrationUseCase {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn execute(
        &self,
        source: &mut dyn FrameSource,
        api: &dyn AttendanceApi,
        reporter: &mut dyn DiagnosticReporter,
    ) -> CheckOutcome {
        reporter.emit(Line::section("🔍", "Testing Face Registration"));

        match self.register(source, api) {
            Ok(message) => {
                reporter.emit(Line::Pass(format!("{LABEL}: {message}")));
                CheckOutcome::passed_with(message)
            }
            Err(failure) => {
                reporter.emit(Line::Fail(submission_failure_message(LABEL, &failure)));
                CheckOutcome::Failed(failure)
            }
        }
    }

    fn register(
        &self,
        source: &mut dyn FrameSource,
        api: &dyn AttendanceApi,
    ) -> Result<String, CheckFailure> {
        let frame_data = capture_frame_data(source)?;
        let request = RegistrationRequest {
            user_id: self.user_id.clone(),
            frame_data,
        };
        let reply = api.register_face(&request)?;
        Ok(reply.message)
    }
}
