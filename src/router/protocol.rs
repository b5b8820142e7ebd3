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

//! JSON structures and protocol bits for the routers API.

#![allow(missing_docs)]

use chrono::{DateTime, FixedOffset};

use super::super::common::protocol::{deser_optional_bool, deser_optional_date, empty_as_none};

protocol_enum! {
    #[doc = "Possible router states."]
    enum RouterState {
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
        Restoring = "Restoring",
        BackingUp = "BackingUp"
    }
}

/// A virtual router.
#[derive(Debug, Clone, Deserialize)]
pub struct Router {
    pub id: String,
    pub name: String,
    pub state: RouterState,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default, deserialize_with = "deser_optional_date")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "domainid")]
    pub domain_id: Option<String>,
    #[serde(default, rename = "guestipaddress", deserialize_with = "empty_as_none")]
    pub guest_ip_address: Option<String>,
    #[serde(default, rename = "hostid")]
    pub host_id: Option<String>,
    #[serde(default, rename = "hostname")]
    pub host_name: Option<String>,
    #[serde(default, rename = "isredundantrouter", deserialize_with = "deser_optional_bool")]
    pub is_redundant: Option<bool>,
    #[serde(default, rename = "linklocalip", deserialize_with = "empty_as_none")]
    pub link_local_ip: Option<String>,
    #[serde(default, rename = "publicip", deserialize_with = "empty_as_none")]
    pub public_ip: Option<String>,
    #[serde(default, rename = "redundantstate")]
    pub redundant_state: Option<String>,
    #[serde(default, rename = "requiresupgrade", deserialize_with = "deser_optional_bool")]
    pub requires_upgrade: Option<bool>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "serviceofferingid")]
    pub service_offering_id: Option<String>,
    #[serde(default, rename = "templateid")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "vpcid")]
    pub vpc_id: Option<String>,
    #[serde(default, rename = "zoneid")]
    pub zone_id: Option<String>,
    #[serde(default, rename = "zonename")]
    pub zone_name: Option<String>,
}
