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

//! Foundation bits exposing the internal load balancer elements API.

use super::super::operation::{FieldKind, FieldSpec, OperationSpec, Verb};

/// List internal load balancer elements.
pub static LIST_INTERNAL_LB_ELEMENTS: OperationSpec = OperationSpec {
    name: "listInternalLoadBalancerElements",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::optional("enabled", FieldKind::Bool),
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("nspid", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
    ],
};

/// Create an internal load balancer element for a network service provider.
pub static CREATE_INTERNAL_LB_ELEMENT: OperationSpec = OperationSpec {
    name: "createInternalLoadBalancerElement",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("internalloadbalancerelement"),
    fields: &[FieldSpec::required("nspid", FieldKind::Str)],
};

/// Enable or disable an internal load balancer element.
pub static CONFIGURE_INTERNAL_LB_ELEMENT: OperationSpec = OperationSpec {
    name: "configureInternalLoadBalancerElement",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("internalloadbalancerelement"),
    fields: &[
        FieldSpec::required("enabled", FieldKind::Bool),
        FieldSpec::required("id", FieldKind::Str),
    ],
};
