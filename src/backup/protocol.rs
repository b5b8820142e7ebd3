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

//! JSON structures for the backup and recovery API.

#![allow(missing_docs)]

use chrono::{DateTime, FixedOffset};

use super::super::common::protocol::{deser_optional_bool, deser_optional_date};

/// A backup of a virtual machine.
#[derive(Debug, Clone, Deserialize)]
pub struct Backup {
    pub id: String,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default, rename = "backupofferingid")]
    pub backup_offering_id: Option<String>,
    #[serde(default, rename = "backupofferingname")]
    pub backup_offering_name: Option<String>,
    #[serde(default, deserialize_with = "deser_optional_date")]
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(default, rename = "domainid")]
    pub domain_id: Option<String>,
    #[serde(default, rename = "externalid")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub backup_type: Option<String>,
    #[serde(default, rename = "virtualmachineid")]
    pub virtual_machine_id: Option<String>,
    #[serde(default, rename = "virtualmachinename")]
    pub virtual_machine_name: Option<String>,
    #[serde(default, rename = "virtualsize")]
    pub virtual_size: Option<i64>,
    #[serde(default, rename = "zoneid")]
    pub zone_id: Option<String>,
}

/// A backup offering imported from a backup provider.
#[derive(Debug, Clone, Deserialize)]
pub struct BackupOffering {
    pub id: String,
    pub name: String,
    #[serde(
        default,
        rename = "allowuserdrivenbackups",
        deserialize_with = "deser_optional_bool"
    )]
    pub allow_user_driven_backups: Option<bool>,
    #[serde(default, deserialize_with = "deser_optional_date")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "externalid")]
    pub external_id: Option<String>,
    #[serde(default, rename = "zoneid")]
    pub zone_id: Option<String>,
}
