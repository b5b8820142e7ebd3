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

//! JSON structures and protocol bits for the hypervisors API.

#![allow(missing_docs)]

use super::super::common::protocol::deser_optional_bool;

/// A hypervisor type supported by the cloud.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Hypervisor {
    pub name: String,
}

/// Capabilities of a hypervisor version.
#[derive(Debug, Clone, Deserialize)]
pub struct HypervisorCapabilities {
    pub id: String,
    pub hypervisor: String,
    #[serde(default, rename = "hypervisorversion")]
    pub hypervisor_version: Option<String>,
    #[serde(default, rename = "maxdatavolumeslimit")]
    pub max_data_volumes_limit: Option<i64>,
    #[serde(default, rename = "maxguestslimit")]
    pub max_guests_limit: Option<i64>,
    #[serde(default, rename = "maxhostspercluster")]
    pub max_hosts_per_cluster: Option<i64>,
    #[serde(
        default,
        rename = "securitygroupenabled",
        deserialize_with = "deser_optional_bool"
    )]
    pub security_group_enabled: Option<bool>,
    #[serde(
        default,
        rename = "storagemotionenabled",
        deserialize_with = "deser_optional_bool"
    )]
    pub storage_motion_enabled: Option<bool>,
    #[serde(
        default,
        rename = "vmsnapshotenabled",
        deserialize_with = "deser_optional_bool"
    )]
    pub vm_snapshot_enabled: Option<bool>,
}
