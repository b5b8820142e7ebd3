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

//! Foundation bits exposing the routers API.
//!
//! All router actions run as asynchronous jobs.

use super::super::operation::{FieldKind, FieldSpec, OperationSpec, Verb};

/// List virtual routers.
pub static LIST_ROUTERS: OperationSpec = OperationSpec {
    name: "listRouters",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::optional("account", FieldKind::Str),
        FieldSpec::optional("clusterid", FieldKind::Str),
        FieldSpec::optional("domainid", FieldKind::Str),
        FieldSpec::optional("fetchhealthcheckresults", FieldKind::Bool),
        FieldSpec::optional("forvpc", FieldKind::Bool),
        FieldSpec::optional("hostid", FieldKind::Str),
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("isrecursive", FieldKind::Bool),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("listall", FieldKind::Bool),
        FieldSpec::optional("name", FieldKind::Str),
        FieldSpec::optional("networkid", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
        FieldSpec::optional("podid", FieldKind::Str),
        FieldSpec::optional("projectid", FieldKind::Str),
        FieldSpec::optional("state", FieldKind::Str),
        FieldSpec::optional("version", FieldKind::Str),
        FieldSpec::optional("vpcid", FieldKind::Str),
        FieldSpec::optional("zoneid", FieldKind::Str),
    ],
};

/// Start a stopped router.
pub static START_ROUTER: OperationSpec = OperationSpec {
    name: "startRouter",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("router"),
    fields: &[FieldSpec::required("id", FieldKind::Str)],
};

/// Stop a router.
pub static STOP_ROUTER: OperationSpec = OperationSpec {
    name: "stopRouter",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("router"),
    fields: &[
        FieldSpec::required("id", FieldKind::Str),
        FieldSpec::optional("forced", FieldKind::Bool),
    ],
};

/// Reboot a router.
pub static REBOOT_ROUTER: OperationSpec = OperationSpec {
    name: "rebootRouter",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("router"),
    fields: &[
        FieldSpec::required("id", FieldKind::Str),
        FieldSpec::optional("forced", FieldKind::Bool),
    ],
};

/// Destroy a router.
pub static DESTROY_ROUTER: OperationSpec = OperationSpec {
    name: "destroyRouter",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("router"),
    fields: &[FieldSpec::required("id", FieldKind::Str)],
};
