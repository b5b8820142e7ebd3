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

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use cloudstack::{Cloud, Config, HttpRequest, HttpResponse, Transport};
use reqwest::StatusCode;
use serde_json::{json, Value};

static INIT: Once = Once::new();

#[derive(Debug, Default)]
struct Script {
    responses: Mutex<VecDeque<(u16, String)>>,
    fallback: Mutex<Option<(u16, String)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

/// Transport replaying scripted responses and recording requests.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Script>,
}

impl FakeTransport {
    pub fn new() -> FakeTransport {
        FakeTransport::default()
    }

    pub fn push(&self, status: u16, body: Value) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    /// Response returned once the scripted ones run out.
    pub fn push_forever(&self, status: u16, body: Value) {
        *self.inner.fallback.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.inner.responses.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> cloudstack::Result<HttpResponse> {
        self.inner.requests.lock().unwrap().push(request);
        let (status, body) = self
            .inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.inner.fallback.lock().unwrap().clone())
            .expect("unexpected request");
        Ok(HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into_bytes(),
        })
    }
}

pub fn config() -> Config {
    Config::new("http://127.0.0.1:8080/client/api", "KEY", "SECRET")
        .unwrap()
        .with_poll_delay(Duration::from_millis(1), Duration::from_millis(5))
}

pub fn set_up_with(config: Config) -> (Cloud, FakeTransport) {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let transport = FakeTransport::new();
    (Cloud::with_transport(config, transport.clone()), transport)
}

pub fn set_up() -> (Cloud, FakeTransport) {
    set_up_with(config())
}

/// Query string of a request, or its body for `POST` requests.
pub fn payload(request: &HttpRequest) -> String {
    match request.body {
        Some(ref body) => body.clone(),
        None => request.url.query().unwrap_or_default().to_string(),
    }
}

pub fn job_pending(jobid: &str) -> Value {
    json!({"queryasyncjobresultresponse": {"jobid": jobid, "jobstatus": 0, "jobprocstatus": 0}})
}

pub fn job_succeeded(jobid: &str, result: Value) -> Value {
    json!({"queryasyncjobresultresponse": {
        "jobid": jobid, "jobstatus": 1, "jobresultcode": 0,
        "jobresulttype": "object", "jobresult": result
    }})
}

pub fn job_failed(jobid: &str, code: u16, text: &str) -> Value {
    json!({"queryasyncjobresultresponse": {
        "jobid": jobid, "jobstatus": 2, "jobresultcode": 530,
        "jobresulttype": "object",
        "jobresult": {"errorcode": code, "errortext": text}
    }})
}

pub fn router_json(id: &str, name: &str, state: &str) -> Value {
    json!({"id": id, "name": name, "state": state, "zoneid": "zone-1"})
}

pub fn routers(items: Vec<Value>) -> Value {
    json!({"listroutersresponse": {"count": items.len(), "router": items}})
}
