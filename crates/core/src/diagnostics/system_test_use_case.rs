use crate::api::domain::attendance_api::{AttendanceApi, Endpoint};
use crate::capture::domain::frame_source::FrameSource;
use crate::diagnostics::attendance_processing_use_case::AttendanceProcessingUseCase;
use crate::diagnostics::check_outcome::CheckOutcome;
use crate::diagnostics::endpoint_reachability_use_case::EndpointReachabilityUseCase;
use crate::diagnostics::face_registration_use_case::FaceRegistrationUseCase;
use crate::diagnostics::reporter::{DiagnosticReporter, Line};
use crate::diagnostics::vision_self_test_use_case::VisionSelfTestUseCase;
use crate::shared::config::DiagnosticConfig;
use crate::vision::domain::vision_toolkit::VisionToolkit;

/// Final summary of a system test run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    AllPassed,
    SomeFailed,
    VisionUnavailable,
}

/// Everything a run produced. Registration and attendance are `None` when
/// the vision self-test failed and the network checks were skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemTestReport {
    pub vision: CheckOutcome,
    pub endpoints: Vec<(Endpoint, CheckOutcome)>,
    pub registration: Option<CheckOutcome>,
    pub attendance: Option<CheckOutcome>,
    pub verdict: Verdict,
}

/// Runs the whole diagnostic sequence against one camera and one backend.
///
/// The vision self-test gates the two frame-submission checks. Endpoint
/// reachability always runs and never affects the verdict.
pub struct SystemTestUseCase {
    source: Box<dyn FrameSource>,
    api: Box<dyn AttendanceApi>,
    toolkit: Box<dyn VisionToolkit>,
    vision: VisionSelfTestUseCase,
    reachability: EndpointReachabilityUseCase,
    registration: FaceRegistrationUseCase,
    attendance: AttendanceProcessingUseCase,
}

impl SystemTestUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        api: Box<dyn AttendanceApi>,
        toolkit: Box<dyn VisionToolkit>,
        config: &DiagnosticConfig,
    ) -> Self {
        Self {
            source,
            api,
            toolkit,
            vision: VisionSelfTestUseCase::new(),
            reachability: EndpointReachabilityUseCase::new(config.endpoints.clone()),
            registration: FaceRegistrationUseCase::new(config.user_id.clone()),
            attendance: AttendanceProcessingUseCase::new(config.session_id.clone()),
        }
    }

    /// Replaces the attendance check, e.g. to pin its clock.
    pub fn with_attendance(mut self, attendance: AttendanceProcessingUseCase) -> Self {
        self.attendance = attendance;
        self
    }

    pub fn execute(&mut self, reporter: &mut dyn DiagnosticReporter) -> SystemTestReport {
        reporter.emit(Line::Title("SecureAttend System Test".into()));
        reporter.emit(Line::Rule);

        let vision = self
            .vision
            .execute(self.toolkit.as_ref(), self.source.as_mut(), reporter);
        reporter.emit(Line::Blank);

        let endpoints = self.reachability.execute(self.api.as_ref(), reporter);
        reporter.emit(Line::Blank);

        if !vision.is_passed() {
            log::info!("vision self-test failed, skipping frame submission checks");
            reporter.emit(Line::Fail(
                "Vision toolkit installation issues detected. Please check requirements.".into(),
            ));
            return SystemTestReport {
                vision,
                endpoints,
                registration: None,
                attendance: None,
                verdict: Verdict::VisionUnavailable,
            };
        }

        let registration =
            self.registration
                .execute(self.source.as_mut(), self.api.as_ref(), reporter);
        reporter.emit(Line::Blank);

        let attendance = self
            .attendance
            .execute(self.source.as_mut(), self.api.as_ref(), reporter);
        reporter.emit(Line::Blank);

        reporter.emit(Line::Rule);
        let verdict = if registration.is_passed() && attendance.is_passed() {
            reporter.emit(Line::Celebrate(
                "All tests passed! System is ready for use.".into(),
            ));
            Verdict::AllPassed
        } else {
            reporter.emit(Line::Warn(
                "Some tests failed. Please check the backend server and camera.".into(),
            ));
            Verdict::SomeFailed
        };

        SystemTestReport {
            vision,
            endpoints,
            registration: Some(registration),
            attendance: Some(attendance),
            verdict,
        }
    }
}
