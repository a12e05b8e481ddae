use std::io;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Serialize;

use crate::api::domain::attendance_api::{ApiError, AttendanceApi, Endpoint};
use crate::api::domain::messages::{AttendanceRequest, RegistrationRequest, ServiceReply};
use crate::shared::constants::{
    ATTENDANCE_PROCESS_PATH, FACE_REGISTER_PATH, PROCESS_TIMEOUT, REGISTER_TIMEOUT,
};

/// Blocking reqwest client for the attendance backend.
///
/// Each call carries its own timeout; the client-wide default (30 s in the
/// blocking client) is switched off.
pub struct HttpAttendanceClient {
    client: Client,
    base_url: String,
    register_timeout: Duration,
    process_timeout: Duration,
}

impl HttpAttendanceClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            register_timeout: REGISTER_TIMEOUT,
            process_timeout: PROCESS_TIMEOUT,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        timeout: Duration,
    ) -> Result<ServiceReply, ApiError> {
        let url = self.url(path);
        let request = self.client.post(&url).json(body).timeout(timeout);
        let response = send(request, "POST", &url)?;
        response.json::<ServiceReply>().map_err(classify)
    }
}

impl AttendanceApi for HttpAttendanceClient {
    fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> Result<(), ApiError> {
        let url = self.url(endpoint.path);
        send(self.client.get(&url).timeout(timeout), "GET", &url).map(|_| ())
    }

    fn register_face(&self, request: &RegistrationRequest) -> Result<ServiceReply, ApiError> {
        self.post_json(FACE_REGISTER_PATH, request, self.register_timeout)
    }

    fn process_attendance(&self, request: &AttendanceRequest) -> Result<ServiceReply, ApiError> {
        self.post_json(ATTENDANCE_PROCESS_PATH, request, self.process_timeout)
    }
}

fn send(
    request: RequestBuilder,
    verb: &str,
    url: &str,
) -> Result<reqwest::blocking::Response, ApiError> {
    let started = Instant::now();
    let response = request.send().map_err(|e| {
        log::debug!("{verb} {url} failed after {:?}: {e}", started.elapsed());
        classify(e)
    })?;

    let status = response.status();
    log::debug!("{verb} {url} -> {status} in {:?}", started.elapsed());
    if status != StatusCode::OK {
        return Err(ApiError::UnexpectedStatus(status.as_u16()));
    }
    Ok(response)
}

fn classify(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(err.to_string())
    } else if err.is_connect() || connection_lost(&err) {
        ApiError::Connection(err.to_string())
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Request(err.to_string())
    }
}

/// A socket reset or closed mid-request surfaces as a request error whose
/// cause chain ends in an I/O error.
fn connection_lost(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            );
        }
        source = cause.source();
    }
    false
}
