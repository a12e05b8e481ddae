use std::time::Duration;

use crate::api::domain::attendance_api::{AttendanceApi, Endpoint};
use crate::diagnostics::check_outcome::{CheckFailure, CheckOutcome};
use crate::diagnostics::reporter::{DiagnosticReporter, Line};
use crate::shared::constants::PROBE_TIMEOUT;

/// Probes each status endpoint once. Purely informational: the outcomes are
/// reported but never gate other checks.
pub struct EndpointReachabilityUseCase {
    endpoints: Vec<Endpoint>,
    timeout: Duration,
}

impl EndpointReachabilityUseCase {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            endpoints,
            timeout: PROBE_TIMEOUT,
        }
    }

    pub fn execute(
        &self,
        api: &dyn AttendanceApi,
        reporter: &mut dyn DiagnosticReporter,
    ) -> Vec<(Endpoint, CheckOutcome)> {
        reporter.emit(Line::section("🌐", "Testing API Endpoints"));

        self.endpoints
            .iter()
            .map(|endpoint| {
                let outcome = CheckOutcome::from(
                    api.probe(endpoint, self.timeout)
                        .map_err(CheckFailure::from),
                );
                let description = endpoint.description;
                match outcome.failure() {
                    None => reporter.emit(Line::Pass(format!("{description}: OK"))),
                    Some(failure) => {
                        log::debug!("GET {} failed: {failure:?}", endpoint.path);
                        reporter.emit(Line::Fail(format!("{description}: {failure}")));
                    }
                }
                (endpoint.clone(), outcome)
            })
            .collect()
    }
}
