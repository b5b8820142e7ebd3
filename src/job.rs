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

//! Asynchronous jobs.
//!
//! Most mutating operations return a job ID instead of a result. The job is
//! then polled with `queryAsyncJobResult` until it succeeds or fails.
//!
//! A timeout only stops the polling: the job keeps running on the server and
//! cannot be cancelled from the client. The `AsyncTimeout` error carries the
//! job ID, so it can be polled again later with
//! [Cloud::wait_for_job](../struct.Cloud.html#method.wait_for_job).

use std::cmp;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiErrorDetails;
use super::operation::{FieldKind, FieldSpec, OperationSpec, Verb};
use super::params::Params;
use super::session::Session;
use super::waiter::{Waiter, WaiterCurrentState};
use super::{Error, ErrorKind, Result};

/// Query the status of an asynchronous job.
pub static QUERY_ASYNC_JOB_RESULT: OperationSpec = OperationSpec {
    name: "queryAsyncJobResult",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[FieldSpec::required("jobid", FieldKind::Str)],
};

/// Status of an asynchronous job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub enum JobStatus {
    /// The job is still running.
    Pending,
    /// The job finished successfully.
    Succeeded,
    /// The job failed.
    Failed,
}

/// Initial response of an asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobHandle {
    /// Job ID.
    pub jobid: String,
    /// ID of the affected resource (if reported).
    #[serde(default)]
    pub id: Option<String>,
}

/// Status report of an asynchronous job.
#[derive(Debug, Clone, Deserialize)]
pub struct AsyncJob {
    /// Job ID.
    pub jobid: String,
    /// Current status.
    #[serde(rename = "jobstatus")]
    pub status: JobStatus,
    /// Command that created the job.
    #[serde(default)]
    pub cmd: Option<String>,
    /// Progress reported by the job.
    #[serde(default, rename = "jobprocstatus")]
    pub proc_status: Option<i64>,
    /// Result code (0 on success).
    #[serde(default, rename = "jobresultcode")]
    pub result_code: Option<i64>,
    /// Result type, `object` or `text`.
    #[serde(default, rename = "jobresulttype")]
    pub result_type: Option<String>,
    /// Result payload.
    #[serde(default, rename = "jobresult")]
    pub result: Option<Value>,
    /// Type of the affected resource.
    #[serde(default, rename = "jobinstancetype")]
    pub instance_type: Option<String>,
    /// ID of the affected resource.
    #[serde(default, rename = "jobinstanceid")]
    pub instance_id: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created: Option<String>,
    /// Completion time.
    #[serde(default)]
    pub completed: Option<String>,
}

/// Outcome of an operation that may run asynchronously.
///
/// `Started` is only returned when the asynchronous mode is disabled in the
/// configuration: the job was accepted, but nobody waited for it.
#[derive(Debug, Clone)]
pub enum JobOutcome<T> {
    /// The operation finished with this result.
    Finished(T),
    /// The job was started and is left running.
    Started(JobHandle),
}

/// Waiter for an asynchronous job to finish.
///
/// Never queries the job again once it has succeeded or failed.
#[derive(Debug)]
pub struct JobWaiter {
    session: Arc<Session>,
    job: AsyncJob,
    envelope: Value,
    result_key: Option<&'static str>,
    queries: usize,
}

impl JobStatus {
    /// Whether the job has finished (successfully or not).
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != JobStatus::Pending
    }

    /// Numeric code used by the API.
    pub fn code(self) -> i64 {
        match self {
            JobStatus::Pending => 0,
            JobStatus::Succeeded => 1,
            JobStatus::Failed => 2,
        }
    }
}

impl TryFrom<i64> for JobStatus {
    type Error = String;

    fn try_from(value: i64) -> ::std::result::Result<JobStatus, String> {
        match value {
            0 => Ok(JobStatus::Pending),
            1 => Ok(JobStatus::Succeeded),
            2 => Ok(JobStatus::Failed),
            other => Err(format!("Unknown job status {}", other)),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            JobStatus::Pending => "pending",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        })
    }
}

impl AsyncJob {
    /// A pending job known only by its ID.
    pub fn pending<S: Into<String>>(jobid: S) -> AsyncJob {
        AsyncJob {
            jobid: jobid.into(),
            status: JobStatus::Pending,
            cmd: None,
            proc_status: None,
            result_code: None,
            result_type: None,
            result: None,
            instance_type: None,
            instance_id: None,
            created: None,
            completed: None,
        }
    }

    /// Error describing why the job failed.
    fn failure(&self) -> Error {
        let text_result = self.result_type.as_deref() == Some("text");
        let (message, details) = match self.result {
            Some(Value::String(ref text)) => (text.clone(), None),
            Some(ref value @ Value::Object(..)) if !text_result => {
                match serde_json::from_value::<ApiErrorDetails>(value.clone()) {
                    Ok(details) => (details.errortext.clone(), Some(details)),
                    Err(..) => (format!("Undefined error: {}", value), None),
                }
            }
            Some(ref other) => (format!("Undefined error: {}", other), None),
            None => ("No error details provided".to_string(), None),
        };
        let err = Error::new(
            ErrorKind::OperationFailed,
            format!("Job {} failed: {}", self.jobid, message),
        )
        .with_job_id(self.jobid.clone());
        match details {
            Some(details) => err.with_api_details(details),
            None => err,
        }
    }
}

/// Query the current status of a job once.
pub fn query_async_job_result<S: AsRef<str>>(session: &Session, jobid: S) -> Result<AsyncJob> {
    let params = Params::new().with("jobid", jobid.as_ref());
    let value = session.request_json(&QUERY_ASYNC_JOB_RESULT, &params)?;
    let job: AsyncJob = serde_json::from_value(value)?;
    trace!("Job {} has status {}", job.jobid, job.status);
    Ok(job)
}

/// Strip the layer a job result (or a synchronous result) is nested under.
///
/// Only an object whose sole member is `result_key` is unwrapped. Without a
/// key, or for any other shape, the payload is returned unchanged, so a
/// payload that was already unwrapped is left alone.
pub fn unwrap_job_result(payload: Value, result_key: Option<&str>) -> Value {
    let expected = match result_key {
        Some(expected) => expected,
        None => return payload,
    };

    match payload {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(expected) => {
            map.remove(expected).unwrap_or(Value::Null)
        }
        other => other,
    }
}

impl<T> JobOutcome<T> {
    /// The result if the operation finished.
    pub fn finished(self) -> Option<T> {
        match self {
            JobOutcome::Finished(value) => Some(value),
            JobOutcome::Started(..) => None,
        }
    }

    /// The job if it was left running.
    pub fn job(&self) -> Option<&JobHandle> {
        match self {
            JobOutcome::Finished(..) => None,
            JobOutcome::Started(ref handle) => Some(handle),
        }
    }

    /// Whether the operation finished.
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self, JobOutcome::Finished(..))
    }

    /// Convert the result if the operation finished.
    pub fn map<U, F: FnOnce(T) -> U>(self, func: F) -> JobOutcome<U> {
        match self {
            JobOutcome::Finished(value) => JobOutcome::Finished(func(value)),
            JobOutcome::Started(handle) => JobOutcome::Started(handle),
        }
    }

    /// Convert the result with a fallible function if the operation finished.
    pub fn and_then<U, F: FnOnce(T) -> Result<U>>(self, func: F) -> Result<JobOutcome<U>> {
        Ok(match self {
            JobOutcome::Finished(value) => JobOutcome::Finished(func(value)?),
            JobOutcome::Started(handle) => JobOutcome::Started(handle),
        })
    }
}

fn job_handle(envelope: &Value) -> Option<JobHandle> {
    let jobid = envelope.get("jobid")?.as_str()?;
    if jobid.is_empty() {
        return None;
    }
    let id = envelope
        .get("id")
        .and_then(Value::as_str)
        .map(ToString::to_string);
    Some(JobHandle {
        jobid: jobid.to_string(),
        id,
    })
}

/// Send an operation and wait for its job (if any).
///
/// Synchronous results and job results are stripped of the operation's
/// result key. With the asynchronous mode disabled, jobs are not waited for.
pub fn dispatch(
    session: &Arc<Session>,
    spec: &OperationSpec,
    params: &Params,
) -> Result<JobOutcome<Value>> {
    let envelope = session.request_json(spec, params)?;
    if !spec.asynchronous {
        return Ok(JobOutcome::Finished(unwrap_job_result(
            envelope,
            spec.result_key,
        )));
    }

    let handle = match job_handle(&envelope) {
        Some(handle) => handle,
        None => {
            debug!("{} returned a result without starting a job", spec.name);
            return Ok(JobOutcome::Finished(unwrap_job_result(
                envelope,
                spec.result_key,
            )));
        }
    };

    if session.config().async_mode() {
        JobWaiter::new(session.clone(), handle, envelope, spec.result_key)
            .wait()
            .map(JobOutcome::Finished)
    } else {
        debug!("Not waiting for job {} of {}", handle.jobid, spec.name);
        Ok(JobOutcome::Started(handle))
    }
}

/// Send an operation, wait for its job (if any) and decode the result.
pub fn execute<T: DeserializeOwned>(
    session: &Arc<Session>,
    spec: &OperationSpec,
    params: &Params,
) -> Result<JobOutcome<T>> {
    dispatch(session, spec, params)?.and_then(|value| Ok(serde_json::from_value(value)?))
}

/// Send an operation that never leaves a job running and decode the result.
pub(crate) fn execute_sync<T: DeserializeOwned>(
    session: &Arc<Session>,
    spec: &OperationSpec,
    params: &Params,
) -> Result<T> {
    match execute(session, spec, params)? {
        JobOutcome::Finished(value) => Ok(value),
        JobOutcome::Started(handle) => Err(Error::new(
            ErrorKind::InvalidResponse,
            format!("{} unexpectedly started job {}", spec.name, handle.jobid),
        )
        .with_job_id(handle.jobid)),
    }
}

impl JobWaiter {
    /// Create a waiter for a job.
    ///
    /// The `envelope` is the initial response of the operation, it is
    /// returned as the partial response on timeout.
    pub fn new(
        session: Arc<Session>,
        handle: JobHandle,
        envelope: Value,
        result_key: Option<&'static str>,
    ) -> JobWaiter {
        debug!("Waiting for asynchronous job {}", handle.jobid);
        JobWaiter {
            session,
            job: AsyncJob::pending(handle.jobid),
            envelope,
            result_key,
            queries: 0,
        }
    }

    /// Create a waiter for a job known only by its ID.
    pub fn for_job_id<S: Into<String>>(
        session: Arc<Session>,
        jobid: S,
        result_key: Option<&'static str>,
    ) -> JobWaiter {
        let jobid = jobid.into();
        let mut envelope = Map::new();
        let _ = envelope.insert("jobid".to_string(), Value::String(jobid.clone()));
        let handle = JobHandle { jobid, id: None };
        JobWaiter::new(session, handle, Value::Object(envelope), result_key)
    }

    /// Job ID.
    #[inline]
    pub fn job_id(&self) -> &String {
        &self.job.jobid
    }

    /// Number of status queries made so far.
    #[inline]
    pub fn queries(&self) -> usize {
        self.queries
    }

    fn partial_response(&self) -> Value {
        let mut result = match self.envelope {
            Value::Object(ref map) => map.clone(),
            _ => Map::new(),
        };
        let _ = result.insert("jobid".to_string(), Value::String(self.job.jobid.clone()));
        let _ = result.insert("jobstatus".to_string(), Value::from(self.job.status.code()));
        Value::Object(result)
    }
}

impl Waiter<Value, Error> for JobWaiter {
    fn default_wait_timeout(&self) -> Option<Duration> {
        self.session.config().poll_timeout()
    }

    fn default_delay(&self) -> Duration {
        self.session.config().poll_delay()
    }

    fn timeout_error(&self) -> Error {
        debug!(
            "Timeout waiting for job {} after {} queries",
            self.job.jobid, self.queries
        );
        Error::async_timeout(self.job.jobid.clone(), self.partial_response())
    }

    fn poll(&mut self) -> Result<Option<Value>> {
        if !self.job.status.is_terminal() {
            self.job = query_async_job_result(&self.session, &self.job.jobid)?;
            self.queries += 1;
        }

        match self.job.status {
            JobStatus::Pending => {
                trace!(
                    "Still waiting for job {} ({:?}), progress {:?}",
                    self.job.jobid,
                    self.job.cmd,
                    self.job.proc_status
                );
                Ok(None)
            }
            JobStatus::Succeeded => {
                debug!("Job {} succeeded", self.job.jobid);
                let result = self.job.result.clone().unwrap_or(Value::Null);
                Ok(Some(unwrap_job_result(result, self.result_key)))
            }
            JobStatus::Failed => {
                let err = self.job.failure();
                debug!("{}", err);
                Err(err)
            }
        }
    }

    fn next_delay(&self, previous: Duration) -> Duration {
        let config = self.session.config();
        cmp::min(
            previous.saturating_add(config.poll_delay()),
            config.max_poll_delay(),
        )
    }
}

impl WaiterCurrentState<AsyncJob> for JobWaiter {
    fn waiter_current_state(&self) -> &AsyncJob {
        &self.job
    }
}

#[cfg(test)]
pub mod test {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::{dispatch, unwrap_job_result, AsyncJob, JobHandle, JobStatus, JobWaiter};
    use crate::operation::{FieldKind, FieldSpec, OperationSpec, Verb};
    use crate::session::test::{new_config, FakeTransport};
    use crate::waiter::{Waiter, WaiterCurrentState};
    use crate::{ErrorKind, Params, Session};

    static REBOOT_THING: OperationSpec = OperationSpec {
        name: "rebootThing",
        verb: Verb::Mutate,
        asynchronous: true,
        result_key: Some("router"),
        fields: &[FieldSpec::required("id", FieldKind::Str)],
    };

    fn job_response(status: i64, result: Option<serde_json::Value>) -> serde_json::Value {
        let mut job = json!({
            "jobid": "job-1",
            "jobstatus": status,
            "cmd": "org.apache.cloudstack.api.command.admin.router.RebootRouterCmd",
        });
        if let Some(result) = result {
            job["jobresult"] = result;
            job["jobresulttype"] = json!("object");
        }
        json!({ "queryasyncjobresultresponse": job })
    }

    fn waiter(transport: &Arc<FakeTransport>, timeout: Option<Duration>) -> JobWaiter {
        let config = new_config().with_poll_timeout(timeout);
        let session = Arc::new(Session::new_with_transport(config, transport.clone()));
        JobWaiter::new(
            session,
            JobHandle {
                jobid: "job-1".to_string(),
                id: Some("r-1".to_string()),
            },
            json!({"jobid": "job-1", "id": "r-1"}),
            Some("router"),
        )
    }

    #[test]
    fn test_job_status_deserialize() {
        let job: AsyncJob = serde_json::from_value(json!({"jobid": "1", "jobstatus": 2})).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(serde_json::from_value::<AsyncJob>(json!({"jobid": "1", "jobstatus": 7})).is_err());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
    }

    #[test]
    fn test_poll_until_success() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, job_response(0, None));
        transport.push(200, job_response(0, None));
        transport.push(
            200,
            job_response(1, Some(json!({"router": {"id": "r-1", "state": "Running"}}))),
        );

        let mut waiter = waiter(&transport, Some(Duration::from_secs(5)));
        let mut result = None;
        while result.is_none() {
            result = waiter.poll().unwrap();
        }
        assert_eq!(result.unwrap(), json!({"id": "r-1", "state": "Running"}));
        assert_eq!(waiter.queries(), 3);
        assert_eq!(waiter.waiter_current_state().status, JobStatus::Succeeded);

        // Polling again after success does not query the server.
        let again = waiter.poll().unwrap().unwrap();
        assert_eq!(again["id"], "r-1");
        assert_eq!(waiter.queries(), 3);
        assert_eq!(transport.requests.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_wait_failure() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(
            200,
            job_response(
                2,
                Some(json!({"errorcode": 530, "errortext": "Router is not running"})),
            ),
        );

        let err = waiter(&transport, Some(Duration::from_secs(5)))
            .wait()
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::OperationFailed);
        assert_eq!(err.job_id().unwrap(), "job-1");
        assert_eq!(err.error_code(), Some(530));
        assert!(err.to_string().contains("Router is not running"));
        assert!(err.partial_response().is_none());
    }

    #[test]
    fn test_wait_failure_text() {
        let transport = Arc::new(FakeTransport::new());
        let mut response = job_response(2, None);
        response["queryasyncjobresultresponse"]["jobresulttype"] = json!("text");
        response["queryasyncjobresultresponse"]["jobresult"] = json!("out of capacity");
        transport.push(200, response);

        let err = waiter(&transport, None).wait().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::OperationFailed);
        assert!(err.to_string().contains("out of capacity"));
    }

    #[test]
    fn test_next_delay_saturates() {
        let config = new_config().with_poll_delay(Duration::MAX, Duration::MAX);
        let session = Arc::new(Session::new_with_transport(config, FakeTransport::new()));
        let waiter = JobWaiter::for_job_id(session, "job-1", None);
        assert_eq!(waiter.next_delay(Duration::MAX), Duration::MAX);
    }

    #[test]
    fn test_wait_timeout() {
        let transport = Arc::new(FakeTransport::new());
        for _ in 0..100 {
            transport.push(200, job_response(0, None));
        }

        let err = waiter(&transport, Some(Duration::from_millis(30)))
            .wait()
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::AsyncTimeout);
        let partial = err.partial_response().unwrap();
        assert_eq!(partial["jobid"], "job-1");
        assert_eq!(partial["id"], "r-1");
        assert_eq!(partial["jobstatus"], 0);
    }

    #[test]
    fn test_query_error_propagates() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(
            431,
            json!({"queryasyncjobresultresponse": {"errorcode": 431, "errortext": "bad job"}}),
        );
        let err = waiter(&transport, None).wait().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unwrap_job_result_with_key() {
        let inner = json!({"id": "r-1", "name": "r-1-VM", "state": "Running"});
        let once = unwrap_job_result(json!({"router": inner.clone()}), Some("router"));
        assert_eq!(once, inner);
        let twice = unwrap_job_result(once, Some("router"));
        assert_eq!(twice, inner);
    }

    #[test]
    fn test_unwrap_job_result_without_key() {
        let payload = json!({"nicsecondaryip": {"details": {"a": "b"}}});
        let once = unwrap_job_result(payload.clone(), None);
        assert_eq!(once, payload);
        assert_eq!(unwrap_job_result(once, None), payload);
    }

    #[test]
    fn test_unwrap_job_result_nested_same_key() {
        let inner = json!({"router": {"id": "r-1"}});
        let once = unwrap_job_result(json!({"router": inner.clone()}), Some("router"));
        assert_eq!(once, inner);
    }

    #[test]
    fn test_unwrap_job_result_leaves_other_shapes() {
        let success = json!({"success": true});
        assert_eq!(unwrap_job_result(success.clone(), None), success);
        assert_eq!(unwrap_job_result(success.clone(), Some("success")), json!(true));
        let other_key = json!({"role": {"id": "1"}});
        assert_eq!(unwrap_job_result(other_key.clone(), Some("router")), other_key);
        assert_eq!(unwrap_job_result(json!("text"), None), json!("text"));
    }

    #[test]
    fn test_dispatch_waits_for_job() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, json!({"rebootthingresponse": {"jobid": "job-1", "id": "r-1"}}));
        transport.push(200, job_response(0, None));
        transport.push(200, job_response(1, Some(json!({"router": {"id": "r-1"}}))));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));

        let outcome = dispatch(&session, &REBOOT_THING, &Params::new().with("id", "r-1")).unwrap();
        assert!(outcome.is_finished());
        assert_eq!(outcome.finished().unwrap(), json!({"id": "r-1"}));
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].method, reqwest::Method::POST);
        assert_eq!(requests[1].method, reqwest::Method::GET);
        assert!(requests[1].url.query().unwrap().contains("command=queryAsyncJobResult"));
    }

    #[test]
    fn test_dispatch_without_async_mode() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, json!({"rebootthingresponse": {"jobid": "job-1", "id": "r-1"}}));
        let config = new_config().with_async(false);
        let session = Arc::new(Session::new_with_transport(config, transport.clone()));

        let outcome = dispatch(&session, &REBOOT_THING, &Params::new().with("id", "r-1")).unwrap();
        let handle = outcome.job().unwrap().clone();
        assert_eq!(handle.jobid, "job-1");
        assert_eq!(handle.id.unwrap(), "r-1");
        assert!(outcome.finished().is_none());
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dispatch_without_job() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, json!({"rebootthingresponse": {"router": {"id": "r-1"}}}));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));
        let outcome = dispatch(&session, &REBOOT_THING, &Params::new().with("id", "r-1")).unwrap();
        assert_eq!(outcome.finished().unwrap(), json!({"id": "r-1"}));
    }
}
