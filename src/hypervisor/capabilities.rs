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

//! Hypervisor capabilities.

use std::sync::Arc;

use super::super::common::Refresh;
use super::super::operation::OperationSpec;
use super::super::params::Params;
use super::super::resource::{resolve_by_id, ListQuery, ListResource};
use super::super::session::Session;
use super::super::Result;
use super::{api, protocol};

/// A query to hypervisor capabilities list.
pub type HypervisorCapabilitiesQuery = ListQuery<HypervisorCapabilities>;

/// Capabilities of a single hypervisor version.
#[derive(Clone, Debug)]
pub struct HypervisorCapabilities {
    session: Arc<Session>,
    inner: protocol::HypervisorCapabilities,
    dirty: Params,
}

impl HypervisorCapabilities {
    fn new(session: Arc<Session>, inner: protocol::HypervisorCapabilities) -> HypervisorCapabilities {
        HypervisorCapabilities {
            session,
            inner,
            dirty: Params::new(),
        }
    }

    transparent_property! {
        #[doc = "Hypervisor type."]
        hypervisor: ref String
    }

    transparent_property! {
        #[doc = "Hypervisor version."]
        hypervisor_version: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Maximum number of data volumes per virtual machine."]
        max_data_volumes_limit: Option<i64>
    }

    /// Update the maximum number of data volumes per virtual machine.
    pub fn set_max_data_volumes_limit(&mut self, value: i64) {
        let _ = self.dirty.set("maxdatavolumeslimit", value);
        self.inner.max_data_volumes_limit = Some(value);
    }

    transparent_property! {
        #[doc = "Maximum number of guests per host."]
        max_guests_limit: Option<i64>
    }

    /// Update the maximum number of guests per host.
    pub fn set_max_guests_limit(&mut self, value: i64) {
        let _ = self.dirty.set("maxguestslimit", value);
        self.inner.max_guests_limit = Some(value);
    }

    transparent_property! {
        #[doc = "Maximum number of hosts per cluster."]
        max_hosts_per_cluster: Option<i64>
    }

    /// Update the maximum number of hosts per cluster.
    pub fn set_max_hosts_per_cluster(&mut self, value: i64) {
        let _ = self.dirty.set("maxhostspercluster", value);
        self.inner.max_hosts_per_cluster = Some(value);
    }

    transparent_property! {
        #[doc = "Whether security groups are supported."]
        security_group_enabled: Option<bool>
    }

    /// Update whether security groups are supported.
    pub fn set_security_group_enabled(&mut self, value: bool) {
        let _ = self.dirty.set("securitygroupenabled", value);
        self.inner.security_group_enabled = Some(value);
    }

    transparent_property! {
        #[doc = "Whether storage motion is supported."]
        storage_motion_enabled: Option<bool>
    }

    /// Update whether storage motion is supported.
    pub fn set_storage_motion_enabled(&mut self, value: bool) {
        let _ = self.dirty.set("storagemotionenabled", value);
        self.inner.storage_motion_enabled = Some(value);
    }

    transparent_property! {
        #[doc = "Whether VM snapshots are supported."]
        vm_snapshot_enabled: Option<bool>
    }

    /// Update whether VM snapshots are supported.
    pub fn set_vm_snapshot_enabled(&mut self, value: bool) {
        let _ = self.dirty.set("vmsnapshotenabled", value);
        self.inner.vm_snapshot_enabled = Some(value);
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Save the changes.
    pub fn save(&mut self) -> Result<()> {
        if self.dirty.is_empty() {
            return Ok(());
        }

        let mut params = self.dirty.clone();
        let _ = params.set("id", self.inner.id.as_str());
        self.inner = api::update_capabilities(&self.session, &params)?;
        self.dirty = Params::new();
        Ok(())
    }
}

impl Refresh for HypervisorCapabilities {
    /// Refresh the capabilities.
    fn refresh(&mut self) -> Result<()> {
        let (caps, _) = resolve_by_id::<HypervisorCapabilities>(&self.session, &self.inner.id, &[])?;
        self.inner = caps.inner;
        self.dirty = Params::new();
        Ok(())
    }
}

impl ListResource for HypervisorCapabilities {
    type Inner = protocol::HypervisorCapabilities;
    const LIST: &'static OperationSpec = &api::LIST_HYPERVISOR_CAPABILITIES;
    const LIST_KEY: &'static str = "hypervisorCapabilities";

    fn from_inner(
        session: &Arc<Session>,
        inner: protocol::HypervisorCapabilities,
    ) -> HypervisorCapabilities {
        HypervisorCapabilities::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}
