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

//! VNF templates and appliances.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use super::super::common::Refresh;
use super::super::job::JobOutcome;
use super::super::operation::OperationSpec;
use super::super::params::Params;
use super::super::resource::{resolve_by_id, ListQuery, ListResource, NamedResource};
use super::super::session::Session;
use super::super::Result;
use super::{api, protocol};

/// A query to VNF template list.
pub type VnfTemplateQuery = ListQuery<VnfTemplate>;

/// A query to VNF appliance list.
pub type VnfApplianceQuery = ListQuery<VnfAppliance>;

/// A template of a virtual network function.
#[derive(Clone, Debug)]
pub struct VnfTemplate {
    session: Arc<Session>,
    inner: protocol::VnfTemplate,
}

/// A deployed VNF appliance.
#[derive(Clone, Debug)]
pub struct VnfAppliance {
    session: Arc<Session>,
    inner: protocol::VnfAppliance,
}

/// A request to deploy a VNF appliance.
#[derive(Clone, Debug)]
pub struct NewVnfAppliance {
    session: Arc<Session>,
    params: Params,
}

impl VnfTemplate {
    transparent_property! {
        #[doc = "Creation date and time."]
        created: Option<DateTime<FixedOffset>>
    }

    transparent_property! {
        #[doc = "Human-readable description."]
        display_text: ref Option<String>
    }

    transparent_property! {
        #[doc = "Image format."]
        format: ref Option<String>
    }

    transparent_property! {
        #[doc = "Hypervisor the template is for."]
        hypervisor: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Whether the template is public."]
        is_public: Option<bool>
    }

    transparent_property! {
        #[doc = "Whether the template is ready to be deployed."]
        is_ready: Option<bool>
    }

    transparent_property! {
        #[doc = "Template name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "Name of the OS type."]
        os_type_name: ref Option<String>
    }

    transparent_property! {
        #[doc = "Image size in bytes."]
        size: Option<i64>
    }

    transparent_property! {
        #[doc = "VNF details (vendor, version, access methods)."]
        vnf_details: ref HashMap<String, String>
    }

    transparent_property! {
        #[doc = "Network interfaces the VNF expects."]
        vnf_nics: ref Vec<protocol::VnfNic>
    }

    transparent_property! {
        #[doc = "ID of the zone."]
        zone_id: ref Option<String>
    }

    /// Start deploying an appliance from this template.
    pub fn deploy<O, Z>(&self, service_offering_id: O, zone_id: Z) -> NewVnfAppliance
    where
        O: Into<String>,
        Z: Into<String>,
    {
        NewVnfAppliance::new(
            self.session.clone(),
            service_offering_id,
            self.inner.id.clone(),
            zone_id,
        )
    }
}

impl ListResource for VnfTemplate {
    type Inner = protocol::VnfTemplate;
    const LIST: &'static OperationSpec = &api::LIST_VNF_TEMPLATES;
    const LIST_KEY: &'static str = "template";

    fn default_params(params: &mut Params) {
        let _ = params.set_default("templatefilter", protocol::TemplateFilter::Executable);
    }

    fn from_inner(session: &Arc<Session>, inner: protocol::VnfTemplate) -> VnfTemplate {
        VnfTemplate {
            session: session.clone(),
            inner,
        }
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}

impl NamedResource for VnfTemplate {
    fn resource_name(&self) -> &str {
        &self.inner.name
    }
}

impl VnfAppliance {
    fn new(session: Arc<Session>, inner: protocol::VnfAppliance) -> VnfAppliance {
        VnfAppliance { session, inner }
    }

    /// Load a VNF appliance.
    pub(crate) fn load<Id: AsRef<str>>(session: Arc<Session>, id: Id) -> Result<VnfAppliance> {
        let (appliance, _) = resolve_by_id::<VnfAppliance>(&session, id.as_ref(), &[])?;
        Ok(appliance)
    }

    transparent_property! {
        #[doc = "Creation date and time."]
        created: Option<DateTime<FixedOffset>>
    }

    transparent_property! {
        #[doc = "Display name (if set)."]
        display_name: ref Option<String>
    }

    transparent_property! {
        #[doc = "Hypervisor the appliance runs on."]
        hypervisor: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Appliance name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "Network interfaces."]
        nics: ref Vec<protocol::ApplianceNic>
    }

    transparent_property! {
        #[doc = "ID of the service offering."]
        service_offering_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Current state."]
        state: protocol::VirtualMachineState
    }

    transparent_property! {
        #[doc = "ID of the template the appliance was deployed from."]
        template_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "VNF details."]
        vnf_details: ref HashMap<String, String>
    }

    transparent_property! {
        #[doc = "Network interfaces of the VNF."]
        vnf_nics: ref Vec<protocol::VnfNic>
    }

    transparent_property! {
        #[doc = "ID of the zone."]
        zone_id: ref Option<String>
    }
}

impl Refresh for VnfAppliance {
    /// Refresh the appliance.
    fn refresh(&mut self) -> Result<()> {
        let (appliance, _) = resolve_by_id::<VnfAppliance>(&self.session, &self.inner.id, &[])?;
        self.inner = appliance.inner;
        Ok(())
    }
}

impl ListResource for VnfAppliance {
    type Inner = protocol::VnfAppliance;
    const LIST: &'static OperationSpec = &api::LIST_VNF_APPLIANCES;
    const LIST_KEY: &'static str = "virtualmachine";

    fn from_inner(session: &Arc<Session>, inner: protocol::VnfAppliance) -> VnfAppliance {
        VnfAppliance::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}

impl NamedResource for VnfAppliance {
    fn resource_name(&self) -> &str {
        &self.inner.name
    }
}

impl NewVnfAppliance {
    /// Start deploying an appliance.
    pub(crate) fn new<O, T, Z>(
        session: Arc<Session>,
        service_offering_id: O,
        template_id: T,
        zone_id: Z,
    ) -> NewVnfAppliance
    where
        O: Into<String>,
        T: Into<String>,
        Z: Into<String>,
    {
        NewVnfAppliance {
            session,
            params: Params::new()
                .with("serviceofferingid", service_offering_id.into())
                .with("templateid", template_id.into())
                .with("zoneid", zone_id.into()),
        }
    }

    /// Request the deployment.
    ///
    /// With the asynchronous mode disabled, only the job is returned.
    pub fn deploy(self) -> Result<JobOutcome<VnfAppliance>> {
        let session = self.session;
        let outcome = api::deploy_vnf_appliance(&session, &self.params)?;
        Ok(outcome.map(|inner| VnfAppliance::new(session, inner)))
    }

    /// Add a VNF detail.
    pub fn add_detail<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let _ = self.params.insert_entry("details", key, value);
    }

    /// Add a VNF detail.
    #[inline]
    pub fn with_detail<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.add_detail(key, value);
        self
    }

    request_param! {
        #[doc = "Set the display name."]
        set_display_name, with_display_name -> "displayname", String
    }

    request_param! {
        #[doc = "Set the SSH key pair."]
        set_keypair, with_keypair -> "keypair", String
    }

    request_param! {
        #[doc = "Set the name."]
        set_name, with_name -> "name", String
    }

    request_param! {
        #[doc = "Set the networks to attach, in the order of VNF NICs."]
        set_networks, with_networks -> "networkids", Vec<String>
    }

    request_param! {
        #[doc = "Set the root disk size in GiB."]
        set_root_disk_size, with_root_disk_size -> "rootdisksize", i64
    }

    request_param! {
        #[doc = "Set whether to start the appliance after deployment."]
        set_start, with_start -> "startvm", bool
    }

    request_param! {
        #[doc = "Set the CIDRs allowed to reach the management interface."]
        set_management_cidrs, with_management_cidrs -> "vnfcidrlist", Vec<String>
    }

    request_param! {
        #[doc = "Set whether to configure firewall and port forwarding for management."]
        set_configure_management, with_configure_management -> "vnfconfiguremanagement", bool
    }
}
