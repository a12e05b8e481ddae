use crate::capture::domain::frame_source::FrameSource;
use crate::diagnostics::check_outcome::{CheckFailure, CheckOutcome};
use crate::diagnostics::reporter::{DiagnosticReporter, Line};
use crate::shared::constants::{EYE_CASCADE_NAME, FACE_CASCADE_NAME, SELF_TEST_IMAGE_SIZE};
use crate::shared::frame::Frame;
use crate::vision::domain::vision_toolkit::VisionToolkit;

/// Local self-test: image conversion → detector cascades → camera access.
///
/// All three probes always run so the operator sees every problem at once;
/// the outcome carries the first failure.
pub struct VisionSelfTestUseCase {
    cascades: Vec<&'static str>,
}

impl VisionSelfTestUseCase {
    pub fn new() -> Self {
        Self {
            cascades: vec![FACE_CASCADE_NAME, EYE_CASCADE_NAME],
        }
    }

    pub fn execute(
        &self,
        toolkit: &dyn VisionToolkit,
        source: &mut dyn FrameSource,
        reporter: &mut dyn DiagnosticReporter,
    ) -> CheckOutcome {
        reporter.emit(Line::section("📷", "Testing Vision Toolkit"));

        let results = [
            self.check_conversion(toolkit, reporter),
            self.check_cascades(toolkit, reporter),
            self.check_camera(source, reporter),
        ];

        match results.into_iter().find_map(Result::err) {
            Some(failure) => CheckOutcome::Failed(failure),
            None => CheckOutcome::passed(),
        }
    }

    fn check_conversion(
        &self,
        toolkit: &dyn VisionToolkit,
        reporter: &mut dyn DiagnosticReporter,
    ) -> Result<(), CheckFailure> {
        let blank = Frame::blank(SELF_TEST_IMAGE_SIZE, SELF_TEST_IMAGE_SIZE, 3);
        let result = toolkit
            .to_grayscale(&blank)
            .map_err(|e| CheckFailure::Other(e.to_string()))
            .and_then(|gray| {
                let expected = (blank.width(), blank.height(), 1);
                if (gray.width(), gray.height(), gray.channels()) == expected {
                    Ok(())
                } else {
                    Err(CheckFailure::Other(format!(
                        "grayscale produced {}x{}x{}",
                        gray.width(),
                        gray.height(),
                        gray.channels()
                    )))
                }
            });

        match &result {
            Ok(()) => reporter.emit(Line::Pass("Image conversion: OK".into())),
            Err(failure) => reporter.emit(Line::Fail(format!("Image conversion: {failure}"))),
        }
        result
    }

    fn check_cascades(
        &self,
        toolkit: &dyn VisionToolkit,
        reporter: &mut dyn DiagnosticReporter,
    ) -> Result<(), CheckFailure> {
        let mut problems = Vec::new();
        for name in &self.cascades {
            match toolkit.load_cascade(name) {
                Ok(summary) if summary.is_empty() => {
                    problems.push(format!("{name}: cascade is empty"));
                }
                Ok(summary) => log::debug!(
                    "{name}: {} stages, {}x{} window",
                    summary.stage_count,
                    summary.window.0,
                    summary.window.1
                ),
                Err(e) => problems.push(e.to_string()),
            }
        }

        if problems.is_empty() {
            reporter.emit(Line::Pass("Cascade classifiers: OK".into()));
            return Ok(());
        }

        reporter.emit(Line::Fail("Cascade classifiers: Failed to load".into()));
        for problem in &problems {
            reporter.emit(Line::Detail(problem.clone()));
        }
        Err(CheckFailure::Other(problems.join("; ")))
    }

    fn check_camera(
        &self,
        source: &mut dyn FrameSource,
        reporter: &mut dyn DiagnosticReporter,
    ) -> Result<(), CheckFailure> {
        let opened = source.open().map(|()| source.is_open());
        source.release();

        match opened {
            Ok(true) => {
                reporter.emit(Line::Pass("Camera access: OK".into()));
                Ok(())
            }
            Ok(false) => {
                reporter.emit(Line::Fail("Camera access: Failed".into()));
                Err(CheckFailure::DeviceUnavailable)
            }
            Err(err) => {
                log::debug!("{}: {err}", source.describe());
                reporter.emit(Line::Fail("Camera access: Failed".into()));
                Err(err.into())
            }
        }
    }
}

impl Default for VisionSelfTestUseCase {
    fn default() -> Self {
        Self::new()
    }
}
