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

mod common;

use std::sync::{Arc, Mutex};

use cloudstack::router::Router;
use cloudstack::{with_project, with_zone, ErrorKind, ListHook};
use serde_json::json;

use common::{payload, router_json, routers, set_up};

fn invalid_id(value: &str) -> serde_json::Value {
    json!({"listroutersresponse": {
        "uuidList": [],
        "errorcode": 431,
        "cserrorcode": 4350,
        "errortext": format!(
            "Unable to execute API command listrouters due to invalid value. \
             Invalid parameter id value={} due to incorrect long value format, \
             or entity does not exist",
            value
        )
    }})
}

#[test]
fn test_resolve_id_single_match() {
    let (cs, transport) = set_up();
    transport.push(200, routers(vec![router_json("r-1", "r-1-VM", "Running")]));

    let (id, count) = cs.resolve_id::<Router, _>("r-1-VM", &[]).unwrap();
    assert_eq!(id, "r-1");
    assert_eq!(count, 1);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(payload(&requests[0]).contains("name=r-1-VM"));
}

#[test]
fn test_resolve_id_prefers_exact_match() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        routers(vec![
            router_json("r-1", "edge", "Running"),
            router_json("r-2", "edge-backup", "Running"),
            router_json("r-3", "edge-old", "Stopped"),
        ]),
    );

    let (id, count) = cs.resolve_id::<Router, _>("edge", &[]).unwrap();
    assert_eq!(id, "r-1");
    assert_eq!(count, 3);
}

#[test]
fn test_resolve_id_no_exact_match() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        routers(vec![
            router_json("r-2", "edge-backup", "Running"),
            router_json("r-3", "edge-old", "Stopped"),
        ]),
    );

    let err = cs.resolve_id::<Router, _>("edge", &[]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NoExactMatch);
    assert!(err.to_string().contains("count 2"));
}

#[test]
fn test_resolve_id_no_match() {
    let (cs, transport) = set_up();
    transport.push(200, json!({"listroutersresponse": {}}));

    let err = cs.resolve_id::<Router, _>("missing", &[]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    assert!(err.to_string().contains("No match found for missing: count 0"));
}

#[test]
fn test_resolve_by_id_found() {
    let (cs, transport) = set_up();
    transport.push(200, routers(vec![router_json("r-1", "r-1-VM", "Running")]));

    let (router, count) = cs.resolve_by_id::<Router, _>("r-1", &[]).unwrap();
    assert_eq!(router.name(), "r-1-VM");
    assert_eq!(count, 1);
    assert!(payload(&transport.requests()[0]).contains("id=r-1"));
}

#[test]
fn test_resolve_by_id_invalid_id_is_no_match() {
    let (cs, transport) = set_up();
    transport.push(431, invalid_id("not-an-id"));

    let err = cs
        .resolve_by_id::<Router, _>("not-an-id", &[])
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    assert!(err.to_string().contains("No match found for not-an-id: count 0"));
}

#[test]
fn test_resolve_by_id_unrelated_parameter_error() {
    let (cs, transport) = set_up();
    transport.push(431, invalid_id("something-else"));

    let err = cs.resolve_by_id::<Router, _>("r-1", &[]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.error_code(), Some(431));
    assert_eq!(err.cs_error_code(), Some(4350));
}

#[test]
fn test_resolve_by_id_other_errors_propagate() {
    let (cs, transport) = set_up();
    transport.push(
        401,
        json!({"listroutersresponse": {"errorcode": 401, "errortext": "unable to verify user credentials"}}),
    );

    let err = cs.resolve_by_id::<Router, _>("r-1", &[]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
}

#[test]
fn test_resolve_by_id_too_many() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        routers(vec![
            router_json("r-1", "r-1-VM", "Running"),
            router_json("r-1", "r-1-VM", "Running"),
        ]),
    );

    let err = cs.resolve_by_id::<Router, _>("r-1", &[]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::TooManyItems);
}

#[test]
fn test_resolve_by_id_empty() {
    let (cs, transport) = set_up();
    let err = cs.resolve_by_id::<Router, _>("", &[]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(transport.requests().is_empty());
}

#[test]
fn test_resolve_by_name_applies_hooks_to_both_requests() {
    let (cs, transport) = set_up();
    transport.push(200, routers(vec![router_json("r-1", "edge", "Running")]));
    transport.push(200, routers(vec![router_json("r-1", "edge", "Running")]));

    let (router, count) = cs
        .resolve_by_name::<Router, _>("edge", &[with_zone("zone-1")])
        .unwrap();
    assert_eq!(router.id(), "r-1");
    assert_eq!(count, 1);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(payload(request).contains("zoneid=zone-1"));
    }
    assert!(payload(&requests[0]).contains("name=edge"));
    assert!(payload(&requests[1]).contains("id=r-1"));
}

#[test]
fn test_resolve_by_name_propagates_no_match() {
    let (cs, transport) = set_up();
    transport.push(200, json!({"listroutersresponse": {}}));

    let err = cs.resolve_by_name::<Router, _>("edge", &[]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn test_default_hooks_run_before_call_hooks() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = order.clone();
    let second = order.clone();

    let (cs, transport) = set_up();
    let cs = cs.with_default_hook(ListHook::new(move |_, params| {
        first.lock().unwrap().push("default");
        let _ = params.set("projectid", "from-default");
        Ok(())
    }));
    transport.push(200, routers(vec![router_json("r-1", "edge", "Running")]));

    let hook = ListHook::new(move |_, _| {
        second.lock().unwrap().push("call");
        Ok(())
    });
    let _ = cs
        .resolve_id::<Router, _>("edge", &[hook, with_project("from-call")])
        .unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["default", "call"]);
    // The call hook overrides the value set by the default one
    assert!(payload(&transport.requests()[0]).contains("projectid=from-call"));
}

#[test]
fn test_hook_failure_stops_request() {
    let (cs, transport) = set_up();
    let hook = ListHook::new(|_, _| {
        Err(cloudstack::Error::new(
            ErrorKind::InvalidInput,
            "no project selected",
        ))
    });

    let err = cs.resolve_id::<Router, _>("edge", &[hook]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(transport.requests().is_empty());
}
