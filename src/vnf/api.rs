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

//! Foundation bits exposing the VNF API.

use std::sync::Arc;

use super::super::job::{execute, JobOutcome};
use super::super::operation::{FieldKind, FieldSpec, MapStyle, OperationSpec, Verb};
use super::super::params::Params;
use super::super::session::Session;
use super::super::Result;
use super::protocol::VnfAppliance;

/// List templates of virtual network functions.
pub static LIST_VNF_TEMPLATES: OperationSpec = OperationSpec {
    name: "listVnfTemplates",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::required("templatefilter", FieldKind::Str),
        FieldSpec::optional("account", FieldKind::Str),
        FieldSpec::optional("domainid", FieldKind::Str),
        FieldSpec::optional("hypervisor", FieldKind::Str),
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("isrecursive", FieldKind::Bool),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("listall", FieldKind::Bool),
        FieldSpec::optional("name", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
        FieldSpec::optional("projectid", FieldKind::Str),
        FieldSpec::optional("tags", FieldKind::Map(MapStyle::KeyValue)),
        FieldSpec::optional("zoneid", FieldKind::Str),
    ],
};

/// List deployed VNF appliances.
pub static LIST_VNF_APPLIANCES: OperationSpec = OperationSpec {
    name: "listVnfAppliances",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::optional("account", FieldKind::Str),
        FieldSpec::optional("domainid", FieldKind::Str),
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("isrecursive", FieldKind::Bool),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("listall", FieldKind::Bool),
        FieldSpec::optional("name", FieldKind::Str),
        FieldSpec::optional("networkid", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
        FieldSpec::optional("projectid", FieldKind::Str),
        FieldSpec::optional("state", FieldKind::Str),
        FieldSpec::optional("templateid", FieldKind::Str),
        FieldSpec::optional("zoneid", FieldKind::Str),
    ],
};

/// Deploy a VNF appliance from a VNF template.
pub static DEPLOY_VNF_APPLIANCE: OperationSpec = OperationSpec {
    name: "deployVnfAppliance",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: Some("virtualmachine"),
    fields: &[
        FieldSpec::required("serviceofferingid", FieldKind::Str),
        FieldSpec::required("templateid", FieldKind::Str),
        FieldSpec::required("zoneid", FieldKind::Str),
        FieldSpec::optional("account", FieldKind::Str),
        FieldSpec::optional("details", FieldKind::Map(MapStyle::Inline)),
        FieldSpec::optional("displayname", FieldKind::Str),
        FieldSpec::optional("domainid", FieldKind::Str),
        FieldSpec::optional("hypervisor", FieldKind::Str),
        FieldSpec::optional("ipaddress", FieldKind::Str),
        FieldSpec::optional("keypair", FieldKind::Str),
        FieldSpec::optional("name", FieldKind::Str),
        FieldSpec::optional("networkids", FieldKind::StrList),
        FieldSpec::optional("projectid", FieldKind::Str),
        FieldSpec::optional("rootdisksize", FieldKind::Int),
        FieldSpec::optional("startvm", FieldKind::Bool),
        FieldSpec::optional("userdata", FieldKind::Str),
        FieldSpec::optional("vnfcidrlist", FieldKind::StrList),
        FieldSpec::optional("vnfconfiguremanagement", FieldKind::Bool),
    ],
};

/// Deploy a VNF appliance.
pub fn deploy_vnf_appliance(
    session: &Arc<Session>,
    params: &Params,
) -> Result<JobOutcome<VnfAppliance>> {
    debug!("Deploying a VNF appliance with {:?}", params);
    let outcome = execute::<VnfAppliance>(session, &DEPLOY_VNF_APPLIANCE, params)?;
    if let JobOutcome::Finished(ref appliance) = outcome {
        debug!("Deployed VNF appliance {} ({})", appliance.name, appliance.id);
    }
    Ok(outcome)
}
