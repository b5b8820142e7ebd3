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

//! Session structure definition.
//!
//! The Session object turns an operation and its parameters into a signed
//! HTTP request, sends it through a `Transport` and checks the response.

use std::fmt;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use tokio::runtime::{Builder as RuntimeBuilder, Runtime};

use super::config::Config;
use super::error::ApiErrorDetails;
use super::hooks::ListHook;
use super::operation::OperationSpec;
use super::params::Params;
use super::signature;
use super::{Error, ErrorKind, Result};

/// A signed HTTP request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Full URL including the query (for `GET` requests).
    pub url: Url,
    /// Form-encoded body (for `POST` requests).
    pub body: Option<String>,
}

/// A raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body.
    pub body: Vec<u8>,
}

/// Something that can send HTTP requests.
///
/// Implementations must be safe to use from several threads at once.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Send a request and return the response, whatever its status is.
    ///
    /// Errors are reserved for failures to get any response at all.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport using `reqwest` with a private runtime.
///
/// Calls block the current thread, so they must not be made from inside
/// another asynchronous runtime.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    runtime: Runtime,
}

/// A CloudStack API session.
///
/// Holds the configuration, the transport and the default list hooks.
#[derive(Clone)]
pub struct Session {
    config: Config,
    transport: Arc<dyn Transport>,
    hooks: Vec<ListHook>,
}

impl HttpTransport {
    /// Create a transport according to the configuration.
    pub fn new(config: &Config) -> Result<HttpTransport> {
        let builder = Client::builder().timeout(config.request_timeout());
        #[cfg(any(feature = "native-tls", feature = "rustls"))]
        let builder = builder.danger_accept_invalid_certs(!config.verify_ssl());
        let client = builder.build()?;
        let runtime = RuntimeBuilder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| {
                Error::new(
                    ErrorKind::ProtocolError,
                    format!("Cannot start a runtime: {}", e),
                )
            })?;
        Ok(HttpTransport { client, runtime })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method, request.url);
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
        }
        self.runtime.block_on(async move {
            let resp = builder.send().await?;
            let status = resp.status();
            let body = resp.bytes().await?;
            Ok::<_, Error>(HttpResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}

impl Session {
    /// Create a new session using an HTTP transport.
    pub fn new(config: Config) -> Result<Session> {
        let transport = HttpTransport::new(&config)?;
        Ok(Session::new_with_transport(config, transport))
    }

    /// Create a new session using the provided transport.
    pub fn new_with_transport<T: Transport + 'static>(config: Config, transport: T) -> Session {
        Session {
            config,
            transport: Arc::new(transport),
            hooks: Vec::new(),
        }
    }

    /// Session configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hooks applied to every list request before per-call hooks.
    #[inline]
    pub fn default_hooks(&self) -> &[ListHook] {
        &self.hooks
    }

    /// Add a default list hook.
    pub fn add_default_hook(&mut self, hook: ListHook) {
        self.hooks.push(hook);
    }

    /// Build a signed request for an operation.
    pub fn build_request(&self, spec: &OperationSpec, params: &Params) -> Result<HttpRequest> {
        if spec.name.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Operation name must not be empty",
            ));
        }

        let mut pairs = params.encode(spec);
        pairs.push(("apiKey".to_string(), self.config.api_key().to_string()));
        pairs.push(("command".to_string(), spec.name.to_string()));
        pairs.push(("response".to_string(), "json".to_string()));
        let query = signature::canonical_query(&pairs);
        let signed = signature::sign(&query, self.config.secret_key())?;
        let full = format!("{}&signature={}", query, signature::escape(&signed));

        let method = spec.verb.method();
        let mut url = self.config.api_url().clone();
        Ok(if method == Method::GET {
            url.set_query(Some(&full));
            HttpRequest {
                method,
                url,
                body: None,
            }
        } else {
            url.set_query(None);
            HttpRequest {
                method,
                url,
                body: Some(full),
            }
        })
    }

    /// Send an operation and return the raw response body.
    ///
    /// Non-successful statuses and error payloads are converted into errors.
    pub fn request(&self, spec: &OperationSpec, params: &Params) -> Result<Vec<u8>> {
        spec.validate(params)?;
        let request = self.build_request(spec, params)?;
        debug!("Sending {} {} request", request.method, spec.name);
        trace!("Request URL {}", redact(&request.url));

        let resp = self.transport.send(request)?;
        trace!(
            "Received status {} for {}: {}",
            resp.status,
            spec.name,
            String::from_utf8_lossy(&resp.body)
        );

        if !resp.status.is_success() {
            return Err(api_error(spec, resp.status, &resp.body));
        }

        Ok(resp.body)
    }

    /// Send an operation and return its JSON result.
    ///
    /// The result is unwrapped from the `<command>response` envelope.
    pub fn request_json(&self, spec: &OperationSpec, params: &Params) -> Result<Value> {
        let body = self.request(spec, params)?;
        let value = unwrap_response(serde_json::from_slice(&body)?);
        if let Some(details) = error_details(&value) {
            debug!("{} returned an error payload: {:?}", spec.name, details);
            return Err(Error::from_api(None, details));
        }
        Ok(value)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Strip the single top-level key every response is nested under.
pub(crate) fn unwrap_response(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 => {
            let key = map.keys().next().cloned().unwrap_or_default();
            match map.remove(&key) {
                Some(inner @ Value::Object(..)) => inner,
                Some(other) => {
                    let _ = map.insert(key, other);
                    Value::Object(map)
                }
                None => Value::Object(map),
            }
        }
        other => other,
    }
}

fn error_details(value: &Value) -> Option<ApiErrorDetails> {
    let obj = value.as_object()?;
    if obj.contains_key("errorcode") && obj.contains_key("errortext") {
        serde_json::from_value(value.clone()).ok()
    } else {
        None
    }
}

fn api_error(spec: &OperationSpec, status: StatusCode, body: &[u8]) -> Error {
    let details = serde_json::from_slice(body)
        .ok()
        .map(unwrap_response)
        .and_then(|value| error_details(&value));
    match details {
        Some(details) => {
            debug!("{} failed with {}: {:?}", spec.name, status, details);
            Error::from_api(Some(status), details)
        }
        None => {
            debug!("{} failed with {} and no error payload", spec.name, status);
            let kind = match status {
                StatusCode::UNAUTHORIZED => ErrorKind::AuthenticationFailed,
                StatusCode::FORBIDDEN => ErrorKind::AccessDenied,
                c if c.is_server_error() => ErrorKind::InternalServerError,
                _ => ErrorKind::InvalidInput,
            };
            Error::new_with_details(
                kind,
                Some(status),
                Some(format!(
                    "{} returned {}: {}",
                    spec.name,
                    status,
                    String::from_utf8_lossy(body)
                )),
            )
        }
    }
}

fn redact(url: &Url) -> String {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "signature")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.is_empty() {
        return url.to_string();
    }
    let _ = url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

#[cfg(test)]
pub mod test {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use reqwest::{Method, StatusCode};
    use serde_json::json;

    use super::{unwrap_response, HttpRequest, HttpResponse, Session, Transport};
    use crate::operation::{FieldKind, FieldSpec, MapStyle, OperationSpec, Verb};
    use crate::{Config, ErrorKind, Params, Result};

    /// Transport returning scripted responses and recording requests.
    #[derive(Debug, Default)]
    pub struct FakeTransport {
        responses: Mutex<VecDeque<(u16, String)>>,
        pub requests: Mutex<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        pub fn new() -> FakeTransport {
            FakeTransport::default()
        }

        pub fn push(&self, status: u16, body: serde_json::Value) {
            self.responses
                .lock()
                .unwrap()
                .push_back((status, body.to_string()));
        }
    }

    impl Transport for FakeTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            let (status, body) = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request");
            Ok(HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.into_bytes(),
            })
        }
    }

    impl Transport for std::sync::Arc<FakeTransport> {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            (**self).send(request)
        }
    }

    pub fn new_config() -> Config {
        Config::new("http://127.0.0.1:8080/client/api", "KEY", "SECRET")
            .unwrap()
            .with_poll_delay(
                std::time::Duration::from_millis(1),
                std::time::Duration::from_millis(5),
            )
    }

    static LIST_FIELDS: &[FieldSpec] = &[
        FieldSpec::optional("name", FieldKind::Str),
        FieldSpec::optional("tags", FieldKind::Map(MapStyle::KeyValue)),
    ];

    static LIST_THINGS: OperationSpec = OperationSpec {
        name: "listThings",
        verb: Verb::Read,
        asynchronous: false,
        result_key: None,
        fields: LIST_FIELDS,
    };

    static CREATE_THING: OperationSpec = OperationSpec {
        name: "createThing",
        verb: Verb::Mutate,
        asynchronous: false,
        result_key: Some("thing"),
        fields: LIST_FIELDS,
    };

    #[test]
    fn test_get_request_is_signed() {
        let session = Session::new_with_transport(new_config(), FakeTransport::new());
        let req = session
            .build_request(&LIST_THINGS, &Params::new().with("name", "a b"))
            .unwrap();
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_none());
        let query = req.url.query().unwrap();
        assert!(query.starts_with("apiKey=KEY&command=listThings&name=a%20b&response=json&signature="));
        assert_eq!(req.url.path(), "/client/api");
    }

    #[test]
    fn test_post_request_has_body() {
        let session = Session::new_with_transport(new_config(), FakeTransport::new());
        let req = session
            .build_request(&CREATE_THING, &Params::new().with("name", "x"))
            .unwrap();
        assert_eq!(req.method, Method::POST);
        assert!(req.url.query().is_none());
        let body = req.body.unwrap();
        assert!(body.starts_with("apiKey=KEY&command=createThing&name=x&response=json&signature="));
    }

    #[test]
    fn test_signature_ignores_insertion_order() {
        let session = Session::new_with_transport(new_config(), FakeTransport::new());
        let mut first = Params::new();
        let _ = first
            .insert_entry("tags", "b", "2")
            .insert_entry("tags", "a", "1")
            .set("name", "x");
        let mut second = Params::new();
        let _ = second
            .set("name", "x")
            .insert_entry("tags", "a", "1")
            .insert_entry("tags", "b", "2");
        assert_eq!(
            session.build_request(&LIST_THINGS, &first).unwrap(),
            session.build_request(&LIST_THINGS, &second).unwrap()
        );
    }

    #[test]
    fn test_request_json_unwraps() {
        let transport = FakeTransport::new();
        transport.push(
            200,
            json!({"listthingsresponse": {"count": 1, "thing": [{"id": "1"}]}}),
        );
        let session = Session::new_with_transport(new_config(), transport);
        let value = session.request_json(&LIST_THINGS, &Params::new()).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["thing"][0]["id"], "1");
    }

    #[test]
    fn test_request_api_error() {
        let transport = FakeTransport::new();
        transport.push(
            431,
            json!({"listthingsresponse": {
                "uuidList": [], "errorcode": 431, "cserrorcode": 9999,
                "errortext": "Unable to execute API command listthings"
            }}),
        );
        let session = Session::new_with_transport(new_config(), transport);
        let err = session.request_json(&LIST_THINGS, &Params::new()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.status(), Some(StatusCode::from_u16(431).unwrap()));
        assert_eq!(err.error_code(), Some(431));
        assert!(err.to_string().contains("Unable to execute API command"));
    }

    #[test]
    fn test_request_error_without_payload() {
        let transport = FakeTransport::new();
        transport.push(502, json!("bad gateway"));
        let session = Session::new_with_transport(new_config(), transport);
        let err = session.request(&LIST_THINGS, &Params::new()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert!(err.api_details().is_none());
    }

    #[test]
    fn test_request_error_payload_with_success_status() {
        let transport = FakeTransport::new();
        transport.push(
            200,
            json!({"listthingsresponse": {"errorcode": 530, "errortext": "boom"}}),
        );
        let session = Session::new_with_transport(new_config(), transport);
        let err = session.request_json(&LIST_THINGS, &Params::new()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_request_validates() {
        let session = Session::new_with_transport(new_config(), FakeTransport::new());
        let err = session
            .request(&LIST_THINGS, &Params::new().with("bogus", 1i64))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unwrap_response() {
        assert_eq!(
            unwrap_response(json!({"x": {"a": 1, "b": 2}})),
            json!({"a": 1, "b": 2})
        );
        assert_eq!(unwrap_response(json!({"a": 1})), json!({"a": 1}));
        assert_eq!(unwrap_response(json!({"a": 1, "b": 2})), json!({"a": 1, "b": 2}));
    }
}
