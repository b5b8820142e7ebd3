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

//! JSON structures for the internal load balancer elements API.

#![allow(missing_docs)]

use super::super::common::protocol::deser_bool;

/// An internal load balancer element of a network service provider.
#[derive(Debug, Clone, Deserialize)]
pub struct InternalLbElement {
    pub id: String,
    #[serde(deserialize_with = "deser_bool")]
    pub enabled: bool,
    #[serde(default, rename = "nspid")]
    pub nsp_id: Option<String>,
}
