use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::domain::attendance_api::AttendanceApi;
use crate::api::domain::messages::{AttendanceData, AttendanceRequest, ServiceReply, SessionDescriptor};
use crate::capture::domain::frame_source::FrameSource;
use crate::diagnostics::check_outcome::{CheckFailure, CheckOutcome};
use crate::diagnostics::frame_submission::{capture_frame_data, submission_failure_message};
use crate::diagnostics::reporter::{DiagnosticReporter, Line};

const LABEL: &str = "Attendance Processing";

/// Wall-clock source for the session timestamp, in Unix seconds.
pub type Clock = fn() -> f64;

/// Captures one frame and submits it for attendance processing, then prints
/// the backend's per-frame analysis.
pub struct AttendanceProcessingUseCase {
    session_id: String,
    clock: Clock,
}

impl AttendanceProcessingUseCase {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            clock: unix_now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn execute(
        &self,
        source: &mut dyn FrameSource,
        api: &dyn AttendanceApi,
        reporter: &mut dyn DiagnosticReporter,
    ) -> CheckOutcome {
        reporter.emit(Line::section("👤", "Testing Attendance Processing"));

        match self.process(source, api) {
            Ok(reply) => {
                reporter.emit(Line::Pass(format!("{LABEL}: {}", reply.message)));
                if let Some(data) = reply.data.as_ref().filter(|d| !d.is_empty()) {
                    report_analysis(data, reporter);
                }
                CheckOutcome::passed_with(reply.message)
            }
            Err(failure) => {
                reporter.emit(Line::Fail(submission_failure_message(LABEL, &failure)));
                CheckOutcome::Failed(failure)
            }
        }
    }

    fn process(
        &self,
        source: &mut dyn FrameSource,
        api: &dyn AttendanceApi,
    ) -> Result<ServiceReply, CheckFailure> {
        let frame_data = capture_frame_data(source)?;
        let request = AttendanceRequest {
            frame_data,
            user_session: SessionDescriptor {
                timestamp: (self.clock)(),
                session_id: self.session_id.clone(),
            },
        };
        Ok(api.process_attendance(&request)?)
    }
}

fn report_analysis(data: &AttendanceData, reporter: &mut dyn DiagnosticReporter) {
    reporter.emit(Line::Detail(format!("Face Detected: {}", data.face_detected())));
    reporter.emit(Line::Detail(format!("Confidence: {:.2}", data.confidence())));
    reporter.emit(Line::Detail(format!("Eyes Detected: {}", data.eyes_detected())));
    reporter.emit(Line::Detail(format!(
        "Liveness Score: {:.2}",
        data.liveness_score()
    )));
    reporter.emit(Line::Detail(format!(
        "Processing Time: {:.2}s",
        data.processing_time()
    )));
    if let Some(user_id) = &data.user_id {
        reporter.emit(Line::Detail(format!("Recognized User: {user_id}")));
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::domain::attendance_api::{ApiError, Endpoint};
    use crate::api::domain::messages::RegistrationRequest;
    use crate::diagnostics::frame_submission::test_support::StubFrameSource;
    use crate::diagnostics::reporter::RecordingReporter;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::time::Duration;

    struct StubApi {
        reply: Result<ServiceReply, ApiError>,
        requests: RefCell<Vec<AttendanceRequest>>,
    }

    impl StubApi {
        fn replying(reply: Result<ServiceReply, ApiError>) -> Self {
            Self {
                reply,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl AttendanceApi for StubApi {
        fn probe(&self, _endpoint: &Endpoint, _timeout: Duration) -> Result<(), ApiError> {
            Ok(())
        }

        fn register_face(&self, _request: &RegistrationRequest) -> Result<ServiceReply, ApiError> {
            unreachable!("attendance never registers faces")
        }

        fn process_attendance(&self, request: &AttendanceRequest) -> Result<ServiceReply, ApiError> {
            self.requests.borrow_mut().push(request.clone());
            self.reply.clone()
        }
    }

    fn fixed_clock() -> f64 {
        1_700_000_000.5
    }

    fn reply_with(data: Option<AttendanceData>) -> Result<ServiceReply, ApiError> {
        Ok(ServiceReply {
            message: "Attendance marked".to_string(),
            data,
        })
    }

    fn run(api: &StubApi) -> (CheckOutcome, RecordingReporter) {
        let mut reporter = RecordingReporter::new();
        let outcome = AttendanceProcessingUseCase::new("test_session_001")
            .with_clock(fixed_clock)
            .execute(&mut StubFrameSource::working(), api, &mut reporter);
        (outcome, reporter)
    }

    #[test]
    fn test_success_prints_all_analysis_fields() {
        let api = StubApi::replying(reply_with(Some(AttendanceData {
            face_detected: Some(true),
            confidence: Some(0.934),
            eyes_detected: Some(2),
            liveness_score: Some(0.81),
            processing_time: Some(0.456),
            user_id: None,
        })));
        let (outcome, reporter) = run(&api);

        assert!(outcome.is_passed());
        assert_eq!(
            reporter.rendered(),
            vec![
                "👤 Testing Attendance Processing...",
                "✅ Attendance Processing: Attendance marked",
                "   - Face Detected: true",
                "   - Confidence: 0.93",
                "   - Eyes Detected: 2",
                "   - Liveness Score: 0.81",
                "   - Processing Time: 0.46s",
            ]
        );
    }

    #[test]
    fn test_missing_liveness_score_prints_zero() {
        let api = StubApi::replying(reply_with(Some(AttendanceData {
            face_detected: Some(true),
            confidence: Some(0.5),
            ..AttendanceData::default()
        })));
        let (outcome, reporter) = run(&api);

        assert!(outcome.is_passed());
        assert!(reporter.mentions("   - Liveness Score: 0.00"));
        assert!(reporter.mentions("   - Eyes Detected: 0"));
        assert!(reporter.mentions("   - Processing Time: 0.00s"));
    }

    #[test]
    fn test_reply_without_data_prints_message_only() {
        let api = StubApi::replying(reply_with(None));
        let (_, reporter) = run(&api);
        assert_eq!(reporter.lines().len(), 2);
    }

    #[test]
    fn test_empty_data_object_prints_message_only() {
        let reply: ServiceReply =
            serde_json::from_str(r#"{"message": "Attendance marked", "data": {}}"#).unwrap();
        let api = StubApi::replying(Ok(reply));
        let (outcome, reporter) = run(&api);

        assert!(outcome.is_passed());
        assert_eq!(
            reporter.rendered(),
            vec![
                "👤 Testing Attendance Processing...",
                "✅ Attendance Processing: Attendance marked",
            ]
        );
    }

    #[test]
    fn test_recognized_user_is_printed_when_present() {
        let api = StubApi::replying(reply_with(Some(AttendanceData {
            user_id: Some("emp-042".into()),
            ..AttendanceData::default()
        })));
        let (_, reporter) = run(&api);
        assert!(reporter.mentions("   - Recognized User: emp-042"));
    }

    #[test]
    fn test_request_carries_session_descriptor() {
        let api = StubApi::replying(reply_with(None));
        run(&api);

        let requests = api.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_session.session_id, "test_session_001");
        assert_relative_eq!(requests[0].user_session.timestamp, 1_700_000_000.5);
        assert!(!requests[0].frame_data.is_empty());
    }

    #[test]
    fn test_timeout_fails_check() {
        let api = StubApi::replying(Err(ApiError::Timeout("after 15s".into())));
        let (outcome, reporter) = run(&api);
        assert_eq!(
            outcome,
            CheckOutcome::Failed(CheckFailure::Timeout("after 15s".into()))
        );
        assert!(reporter.mentions("❌ Test failed: timed out (after 15s)"));
    }

    #[test]
    fn test_non_200_reports_status() {
        let api = StubApi::replying(Err(ApiError::UnexpectedStatus(500)));
        let (_, reporter) = run(&api);
        assert!(reporter.mentions("❌ Attendance Processing Failed: 500"));
    }

    #[test]
    fn test_default_clock_is_current_time() {
        assert!(unix_now() > 1_600_000_000.0);
    }
}
