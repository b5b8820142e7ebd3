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

//! Foundation bits exposing the hypervisors API.

use std::sync::Arc;

use super::super::hooks::apply_all;
use super::super::job::execute_sync;
use super::super::operation::{FieldKind, FieldSpec, OperationSpec, Verb};
use super::super::params::Params;
use super::super::resource::Listing;
use super::super::session::Session;
use super::super::Result;
use super::protocol::{Hypervisor, HypervisorCapabilities};

/// List hypervisor types available in the cloud or a zone.
pub static LIST_HYPERVISORS: OperationSpec = OperationSpec {
    name: "listHypervisors",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[FieldSpec::optional("zoneid", FieldKind::Str)],
};

/// List capabilities of hypervisor versions.
pub static LIST_HYPERVISOR_CAPABILITIES: OperationSpec = OperationSpec {
    name: "listHypervisorCapabilities",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::optional("hypervisor", FieldKind::Str),
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
    ],
};

/// Update capabilities of a hypervisor version.
pub static UPDATE_HYPERVISOR_CAPABILITIES: OperationSpec = OperationSpec {
    name: "updateHypervisorCapabilities",
    verb: Verb::Mutate,
    asynchronous: false,
    result_key: Some("hypervisorCapabilities"),
    fields: &[
        FieldSpec::required("id", FieldKind::Str),
        FieldSpec::optional("maxdatavolumeslimit", FieldKind::Int),
        FieldSpec::optional("maxguestslimit", FieldKind::Int),
        FieldSpec::optional("maxhostspercluster", FieldKind::Int),
        FieldSpec::optional("securitygroupenabled", FieldKind::Bool),
        FieldSpec::optional("storagemotionenabled", FieldKind::Bool),
        FieldSpec::optional("vmsnapshotenabled", FieldKind::Bool),
    ],
};

/// List hypervisor types, applying the default hooks.
pub fn list_hypervisors(session: &Arc<Session>, mut params: Params) -> Result<Vec<Hypervisor>> {
    apply_all(session.default_hooks(), &LIST_HYPERVISORS, &mut params)?;
    let value = session.request_json(&LIST_HYPERVISORS, &params)?;
    let listing: Listing<Hypervisor> = Listing::from_value(value, "hypervisor")?;
    trace!("Received hypervisors {:?}", listing.items);
    Ok(listing.items)
}

/// Update capabilities of a hypervisor version.
pub fn update_capabilities(session: &Arc<Session>, params: &Params) -> Result<HypervisorCapabilities> {
    debug!("Updating hypervisor capabilities with {:?}", params);
    execute_sync(session, &UPDATE_HYPERVISOR_CAPABILITIES, params)
}
