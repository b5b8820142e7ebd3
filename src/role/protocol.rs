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

//! JSON structures and protocol bits for the roles API.

#![allow(missing_docs)]

use super::super::common::protocol::deser_optional_bool;

protocol_enum! {
    #[doc = "Type of a role."]
    enum RoleType {
        Admin = "Admin",
        ResourceAdmin = "ResourceAdmin",
        DomainAdmin = "DomainAdmin",
        User = "User"
    }
}

/// A role.
#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub role_type: RoleType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "ispublic", deserialize_with = "deser_optional_bool")]
    pub is_public: Option<bool>,
    #[serde(default, rename = "isdefault", deserialize_with = "deser_optional_bool")]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub state: Option<String>,
}
