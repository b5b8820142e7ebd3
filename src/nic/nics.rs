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

//! Network interfaces of virtual machines.

use std::sync::Arc;

use super::super::common::protocol::SuccessResponse;
use super::super::common::Refresh;
use super::super::hooks::ListHook;
use super::super::job::{execute, JobOutcome};
use super::super::operation::OperationSpec;
use super::super::params::Params;
use super::super::resource::{resolve_by_id, ListQuery, ListResource};
use super::super::session::Session;
use super::super::{Error, ErrorKind, Result};
use super::{api, protocol};

/// A query to NIC list.
pub type NicQuery = ListQuery<Nic>;

/// Structure representing a single NIC.
#[derive(Clone, Debug)]
pub struct Nic {
    session: Arc<Session>,
    inner: protocol::Nic,
}

/// Hook scoping NIC requests to a virtual machine.
pub(crate) fn for_virtual_machine<S: Into<String>>(vm_id: S) -> ListHook {
    let vm_id = vm_id.into();
    ListHook::new(move |spec, params| {
        if spec.accepts("virtualmachineid") {
            let _ = params.set_default("virtualmachineid", vm_id.as_str());
        }
        Ok(())
    })
}

impl Nic {
    fn new(session: Arc<Session>, inner: protocol::Nic) -> Nic {
        Nic { session, inner }
    }

    /// Load a NIC of a virtual machine.
    pub(crate) fn load<V, Id>(session: Arc<Session>, vm_id: V, id: Id) -> Result<Nic>
    where
        V: Into<String>,
        Id: AsRef<str>,
    {
        let hooks = [for_virtual_machine(vm_id)];
        let (nic, _) = resolve_by_id::<Nic>(&session, id.as_ref(), &hooks)?;
        Ok(nic)
    }

    transparent_property! {
        #[doc = "Default gateway."]
        gateway: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Primary IPv4 address."]
        ip_address: ref Option<String>
    }

    transparent_property! {
        #[doc = "IPv6 address."]
        ip6_address: ref Option<String>
    }

    transparent_property! {
        #[doc = "Whether this is the default NIC of the virtual machine."]
        is_default: Option<bool>
    }

    transparent_property! {
        #[doc = "MAC address."]
        mac_address: ref Option<String>
    }

    transparent_property! {
        #[doc = "Network mask."]
        netmask: ref Option<String>
    }

    transparent_property! {
        #[doc = "ID of the network."]
        network_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Secondary IP addresses."]
        secondary_ips: ref Vec<protocol::SecondaryIp>
    }

    transparent_property! {
        #[doc = "Traffic type of the network."]
        traffic_type: ref Option<String>
    }

    transparent_property! {
        #[doc = "ID of the virtual machine."]
        virtual_machine_id: ref Option<String>
    }

    /// Assign a secondary IP address, picking a free one if `None`.
    pub fn add_secondary_ip(
        &mut self,
        ip_address: Option<&str>,
    ) -> Result<JobOutcome<protocol::SecondaryIp>> {
        let mut params = Params::new().with("nicid", self.inner.id.as_str());
        if let Some(ip) = ip_address {
            let _ = params.set("ipaddress", ip);
        }
        let outcome = execute::<protocol::SecondaryIp>(&self.session, &api::ADD_IP_TO_NIC, &params)?;
        if let JobOutcome::Finished(ref ip) = outcome {
            debug!("Added IP {} to NIC {}", ip.ip_address, self.inner.id);
            self.inner.secondary_ips.push(ip.clone());
        }
        Ok(outcome)
    }

    /// Remove a secondary IP address by its ID.
    pub fn remove_secondary_ip<S: AsRef<str>>(&mut self, id: S) -> Result<JobOutcome<()>> {
        let id = id.as_ref();
        if !self.inner.secondary_ips.iter().any(|ip| ip.id == id) {
            return Err(Error::new(
                ErrorKind::ResourceNotFound,
                format!("NIC {} has no secondary IP {}", self.inner.id, id),
            ));
        }

        let params = Params::new().with("id", id);
        let outcome =
            execute::<SuccessResponse>(&self.session, &api::REMOVE_IP_FROM_NIC, &params)?;
        let outcome = outcome.and_then(|resp| resp.into_result(api::REMOVE_IP_FROM_NIC.name))?;
        if outcome.is_finished() {
            self.inner.secondary_ips.retain(|ip| ip.id != id);
        }
        Ok(outcome)
    }
}

impl Refresh for Nic {
    /// Refresh the NIC.
    fn refresh(&mut self) -> Result<()> {
        let vm_id = self.inner.virtual_machine_id.clone().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("NIC {} has no virtual machine ID", self.inner.id),
            )
        })?;
        let hooks = [for_virtual_machine(vm_id)];
        let (nic, _) = resolve_by_id::<Nic>(&self.session, &self.inner.id, &hooks)?;
        self.inner = nic.inner;
        Ok(())
    }
}

impl ListResource for Nic {
    type Inner = protocol::Nic;
    const LIST: &'static OperationSpec = &api::LIST_NICS;
    const LIST_KEY: &'static str = "nic";
    const ID_FILTER: &'static str = "nicid";

    fn from_inner(session: &Arc<Session>, inner: protocol::Nic) -> Nic {
        Nic::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}
