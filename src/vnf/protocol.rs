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

//! JSON structures and protocol bits for the VNF API.

#![allow(missing_docs)]

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use super::super::common::protocol::{
    deser_bool, deser_optional_bool, deser_optional_date, empty_as_none,
};

protocol_enum! {
    #[doc = "Possible states of a virtual machine."]
    enum VirtualMachineState {
        Starting = "Starting",
        Running = "Running",
        Stopping = "Stopping",
        Stopped = "Stopped",
        Destroyed = "Destroyed",
        Expunging = "Expunging",
        Migrating = "Migrating",
        Error = "Error",
        Unknown = "Unknown",
        Shutdown = "Shutdown",
        Restoring = "Restoring"
    }
}

protocol_enum! {
    #[doc = "Filter for the VNF template list."]
    enum TemplateFilter {
        All = "all",
        Community = "community",
        Executable = "executable",
        Featured = "featured",
        SelfExecutable = "selfexecutable",
        SharedExecutable = "sharedexecutable",
        Shared = "shared"
    }
}

/// A network interface a VNF template expects.
#[derive(Debug, Clone, Deserialize)]
pub struct VnfNic {
    #[serde(rename = "deviceid")]
    pub device_id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "deser_bool")]
    pub required: bool,
    #[serde(default, deserialize_with = "deser_bool")]
    pub management: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// A template of a virtual network function.
#[derive(Debug, Clone, Deserialize)]
pub struct VnfTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deser_optional_date")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, rename = "displaytext")]
    pub display_text: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub hypervisor: Option<String>,
    #[serde(default, rename = "ispublic", deserialize_with = "deser_optional_bool")]
    pub is_public: Option<bool>,
    #[serde(default, rename = "isready", deserialize_with = "deser_optional_bool")]
    pub is_ready: Option<bool>,
    #[serde(default, rename = "ostypename")]
    pub os_type_name: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default, rename = "templatetype")]
    pub template_type: Option<String>,
    #[serde(default, rename = "vnfdetails")]
    pub vnf_details: HashMap<String, String>,
    #[serde(default, rename = "vnfnics")]
    pub vnf_nics: Vec<VnfNic>,
    #[serde(default, rename = "zoneid")]
    pub zone_id: Option<String>,
}

/// A network interface of a deployed appliance.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplianceNic {
    pub id: String,
    #[serde(default, rename = "ipaddress", deserialize_with = "empty_as_none")]
    pub ip_address: Option<String>,
    #[serde(default, rename = "isdefault", deserialize_with = "deser_optional_bool")]
    pub is_default: Option<bool>,
    #[serde(default, rename = "macaddress")]
    pub mac_address: Option<String>,
    #[serde(default, rename = "networkid")]
    pub network_id: Option<String>,
}

/// A deployed VNF appliance.
#[derive(Debug, Clone, Deserialize)]
pub struct VnfAppliance {
    pub id: String,
    pub name: String,
    pub state: VirtualMachineState,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default, deserialize_with = "deser_optional_date")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, rename = "displayname")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub hypervisor: Option<String>,
    #[serde(default, rename = "nic")]
    pub nics: Vec<ApplianceNic>,
    #[serde(default, rename = "serviceofferingid")]
    pub service_offering_id: Option<String>,
    #[serde(default, rename = "templateid")]
    pub template_id: Option<String>,
    #[serde(default, rename = "vnfdetails")]
    pub vnf_details: HashMap<String, String>,
    #[serde(default, rename = "vnfnics")]
    pub vnf_nics: Vec<VnfNic>,
    #[serde(default, rename = "zoneid")]
    pub zone_id: Option<String>,
}
