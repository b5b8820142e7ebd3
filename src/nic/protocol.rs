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

//! JSON structures and protocol bits for the NIC API.

#![allow(missing_docs)]

use super::super::common::protocol::{deser_optional_bool, empty_as_none};

/// A secondary IP address of a NIC.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecondaryIp {
    pub id: String,
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    #[serde(default, rename = "nicid")]
    pub nic_id: Option<String>,
    #[serde(default, rename = "networkid")]
    pub network_id: Option<String>,
    #[serde(default, rename = "virtualmachineid")]
    pub virtual_machine_id: Option<String>,
}

/// A network interface of a virtual machine.
#[derive(Debug, Clone, Deserialize)]
pub struct Nic {
    pub id: String,
    #[serde(default, rename = "deviceid")]
    pub device_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub gateway: Option<String>,
    #[serde(default, rename = "ipaddress", deserialize_with = "empty_as_none")]
    pub ip_address: Option<String>,
    #[serde(default, rename = "ip6address", deserialize_with = "empty_as_none")]
    pub ip6_address: Option<String>,
    #[serde(default, rename = "isdefault", deserialize_with = "deser_optional_bool")]
    pub is_default: Option<bool>,
    #[serde(default, rename = "macaddress")]
    pub mac_address: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub netmask: Option<String>,
    #[serde(default, rename = "networkid")]
    pub network_id: Option<String>,
    #[serde(default, rename = "networkname")]
    pub network_name: Option<String>,
    #[serde(default, rename = "secondaryip")]
    pub secondary_ips: Vec<SecondaryIp>,
    #[serde(default, rename = "traffictype")]
    pub traffic_type: Option<String>,
    #[serde(default, rename = "type")]
    pub nic_type: Option<String>,
    #[serde(default, rename = "virtualmachineid")]
    pub virtual_machine_id: Option<String>,
}
