// Copyright 2024 Dmitry Tantsur <divius.inside@gmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error and Result implementations.

use std::fmt;

use reqwest::Error as HttpClientError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use serde_json::Value;

/// Kind of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failure
    ///
    /// Maps to HTTP 401.
    AuthenticationFailed,

    /// Access denied.
    ///
    /// Maps to HTTP 403 and CloudStack error 531.
    AccessDenied,

    /// Requested resource was not found.
    ///
    /// Also returned by lookups that produce no matches.
    ResourceNotFound,

    /// Request returned more items than expected.
    ///
    /// Returned by lookups by ID that match more than one resource.
    TooManyItems,

    /// Several resources matched the name, but none of them exactly.
    NoExactMatch,

    /// Invalid value passed to one of paremeters.
    ///
    /// May be result of HTTP 400 or CloudStack error 431.
    InvalidInput,

    /// Invalid or missing configuration.
    InvalidConfig,

    /// Conflict in the request.
    Conflict,

    /// An asynchronous job did not finish before the poll timeout.
    ///
    /// This is not a failure of the job itself: the job keeps running on the
    /// server and can be polled again using the job ID from the error.
    AsyncTimeout,

    /// An asynchronous job finished with a failure.
    OperationFailed,

    /// Protocol-level error reported by underlying HTTP library.
    ProtocolError,

    /// Response received from the server is malformed.
    InvalidResponse,

    /// Internal server error.
    ///
    /// Maps to HTTP 5xx codes and CloudStack error 530.
    InternalServerError,
}

/// Error details reported by the CloudStack API itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetails {
    /// CloudStack error code (e.g. 431 for parameter errors).
    pub errorcode: u16,
    /// Code of the Java exception class on the management server.
    #[serde(default)]
    pub cserrorcode: Option<u32>,
    /// Human-readable error text.
    #[serde(default)]
    pub errortext: String,
}

/// Error from a CloudStack call.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    status: Option<StatusCode>,
    message: Option<String>,
    details: Option<ApiErrorDetails>,
    job_id: Option<String>,
    partial_response: Option<Value>,
}

/// Result of a CloudStack call.
pub type Result<T> = ::std::result::Result<T, Error>;

impl Error {
    /// Create a new error of the provided kind.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Error {
        Error {
            kind,
            status: None,
            message: Some(message.into()),
            details: None,
            job_id: None,
            partial_response: None,
        }
    }

    /// Create with providing all details.
    pub(crate) fn new_with_details(
        kind: ErrorKind,
        status: Option<StatusCode>,
        message: Option<String>,
    ) -> Error {
        Error {
            kind,
            status,
            message,
            details: None,
            job_id: None,
            partial_response: None,
        }
    }

    /// Create an error from an error payload returned by the API.
    pub(crate) fn from_api(status: Option<StatusCode>, details: ApiErrorDetails) -> Error {
        let kind = match details.errorcode {
            401 => ErrorKind::AuthenticationFailed,
            431 | 432 => ErrorKind::InvalidInput,
            531 => ErrorKind::AccessDenied,
            536 | 537 => ErrorKind::Conflict,
            530 => ErrorKind::InternalServerError,
            other => match status.or_else(|| StatusCode::from_u16(other).ok()) {
                Some(code) => kind_from_status(code),
                None => ErrorKind::InternalServerError,
            },
        };
        let message = match details.cserrorcode {
            Some(cs) => format!(
                "CloudStack API error {} (CSExceptionErrorCode: {}): {}",
                details.errorcode, cs, details.errortext
            ),
            None => format!(
                "CloudStack API error {}: {}",
                details.errorcode, details.errortext
            ),
        };
        Error {
            kind,
            status,
            message: Some(message),
            details: Some(details),
            job_id: None,
            partial_response: None,
        }
    }

    /// The sentinel returned when a job is still pending at the deadline.
    pub(crate) fn async_timeout<S: Into<String>>(job_id: S, partial_response: Value) -> Error {
        let job_id = job_id.into();
        Error {
            kind: ErrorKind::AsyncTimeout,
            status: None,
            message: Some(format!(
                "Timeout waiting for asynchronous job {} to finish",
                job_id
            )),
            details: None,
            job_id: Some(job_id),
            partial_response: Some(partial_response),
        }
    }

    /// Attach a job ID to the error.
    pub(crate) fn with_job_id<S: Into<String>>(mut self, job_id: S) -> Error {
        self.job_id = Some(job_id.into());
        self
    }

    /// Attach API error details to the error.
    pub(crate) fn with_api_details(mut self, details: ApiErrorDetails) -> Error {
        self.details = Some(details);
        self
    }

    /// Error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status code (if any).
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Error message (if any).
    #[inline]
    pub fn message(&self) -> Option<&String> {
        self.message.as_ref()
    }

    /// Error details returned by the CloudStack API (if any).
    #[inline]
    pub fn api_details(&self) -> Option<&ApiErrorDetails> {
        self.details.as_ref()
    }

    /// CloudStack error code (if any).
    pub fn error_code(&self) -> Option<u16> {
        self.details.as_ref().map(|d| d.errorcode)
    }

    /// CloudStack exception code (if any).
    pub fn cs_error_code(&self) -> Option<u32> {
        self.details.as_ref().and_then(|d| d.cserrorcode)
    }

    /// ID of the asynchronous job this error relates to (if any).
    #[inline]
    pub fn job_id(&self) -> Option<&String> {
        self.job_id.as_ref()
    }

    /// Whether this is the asynchronous timeout sentinel.
    #[inline]
    pub fn is_async_timeout(&self) -> bool {
        self.kind == ErrorKind::AsyncTimeout
    }

    /// The best known response when an asynchronous job timed out.
    ///
    /// Only set for `ErrorKind::AsyncTimeout`. Usually contains the initial
    /// envelope with the `jobid` and `jobstatus` fields.
    #[inline]
    pub fn partial_response(&self) -> Option<&Value> {
        self.partial_response.as_ref()
    }

    /// The partial response converted into a typed structure.
    pub fn partial_response_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.partial_response
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

fn kind_from_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED => ErrorKind::AuthenticationFailed,
        StatusCode::FORBIDDEN => ErrorKind::AccessDenied,
        StatusCode::NOT_FOUND | StatusCode::GONE => ErrorKind::ResourceNotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        c if c.is_client_error() => ErrorKind::InvalidInput,
        c if c.is_server_error() => ErrorKind::InternalServerError,
        _ => ErrorKind::InvalidResponse,
    }
}

impl ErrorKind {
    /// Short description of the error kind.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::AuthenticationFailed => "Failed to authenticate",
            ErrorKind::AccessDenied => "Access to the resource is denied",
            ErrorKind::ResourceNotFound => "Requested resource was not found",
            ErrorKind::TooManyItems => "Request returned too many items",
            ErrorKind::NoExactMatch => "Could not find an exact match",
            ErrorKind::InvalidInput => "Input value(s) are invalid or missing",
            ErrorKind::InvalidConfig => "Configuration is invalid or missing",
            ErrorKind::Conflict => "Requested cannot be fulfilled due to a conflict",
            ErrorKind::AsyncTimeout => "Time out reached while waiting for the asynchronous job",
            ErrorKind::OperationFailed => "Requested operation has failed",
            ErrorKind::ProtocolError => "Error when accessing the server",
            ErrorKind::InvalidResponse => "Received invalid response",
            ErrorKind::InternalServerError => "Internal server error or bad gateway",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(ref msg) = self.message {
            write!(f, ": {}", msg)
        } else {
            Ok(())
        }
    }
}

impl ::std::error::Error for Error {}

impl From<HttpClientError> for Error {
    fn from(value: HttpClientError) -> Error {
        let msg = value.to_string();
        let kind = match value.status() {
            Some(code) => kind_from_status(code),
            None if value.is_decode() => ErrorKind::InvalidResponse,
            None => ErrorKind::ProtocolError,
        };

        Error::new_with_details(kind, value.status(), Some(msg))
    }
}

impl From<JsonError> for Error {
    fn from(value: JsonError) -> Error {
        Error::new(
            ErrorKind::InvalidResponse,
            format!("Cannot decode JSON: {}", value),
        )
    }
}

#[cfg(test)]
pub mod test {
    use reqwest::StatusCode;

    use super::{ApiErrorDetails, Error, ErrorKind};

    #[test]
    fn test_error_from_api() {
        let err = Error::from_api(
            Some(StatusCode::from_u16(431).unwrap()),
            ApiErrorDetails {
                errorcode: 431,
                cserrorcode: Some(4350),
                errortext: "Unable to execute API command".to_string(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.error_code(), Some(431));
        assert_eq!(err.cs_error_code(), Some(4350));
        assert_eq!(
            err.to_string(),
            "Input value(s) are invalid or missing: CloudStack API error 431 \
             (CSExceptionErrorCode: 4350): Unable to execute API command"
        );
    }

    #[test]
    fn test_error_from_api_unknown_code() {
        let err = Error::from_api(
            None,
            ApiErrorDetails {
                errorcode: 503,
                cserrorcode: None,
                errortext: "try later".to_string(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_async_timeout_identity() {
        let err = Error::async_timeout("job-1", serde_json::json!({"jobid": "job-1"}));
        assert_eq!(err.kind(), ErrorKind::AsyncTimeout);
        assert!(err.is_async_timeout());
        assert_eq!(err.job_id().unwrap(), "job-1");
        let other = Error::new(ErrorKind::OperationFailed, "job-1 timed out");
        assert!(!other.is_async_timeout());
    }

    #[test]
    fn test_partial_response_as() {
        #[derive(Deserialize)]
        struct Envelope {
            jobid: String,
        }

        let err = Error::async_timeout("job-1", serde_json::json!({"jobid": "job-1"}));
        let env: Envelope = err.partial_response_as().unwrap();
        assert_eq!(env.jobid, "job-1");
    }
}
