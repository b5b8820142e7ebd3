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

//! Foundation bits exposing the NIC API.

use super::super::operation::{FieldKind, FieldSpec, OperationSpec, Verb};

/// List NICs of a virtual machine.
pub static LIST_NICS: OperationSpec = OperationSpec {
    name: "listNics",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::required("virtualmachineid", FieldKind::Str),
        FieldSpec::optional("fordisplay", FieldKind::Bool),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("networkid", FieldKind::Str),
        FieldSpec::optional("nicid", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
    ],
};

/// Assign a secondary IP address to a NIC.
pub static ADD_IP_TO_NIC: OperationSpec = OperationSpec {
    name: "addIpToNic",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("nicsecondaryip"),
    fields: &[
        FieldSpec::required("nicid", FieldKind::Str),
        FieldSpec::optional("ipaddress", FieldKind::Str),
    ],
};

/// Remove a secondary IP address from a NIC.
pub static REMOVE_IP_FROM_NIC: OperationSpec = OperationSpec {
    name: "removeIpFromNic",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: None,
    fields: &[FieldSpec::required("id", FieldKind::Str)],
};
