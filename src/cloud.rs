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

//! Cloud API.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::backup::{self, Backup, BackupOffering, BackupOfferingQuery, BackupQuery};
use super::config::Config;
use super::hooks::ListHook;
use super::hypervisor::{self, Hypervisor, HypervisorCapabilities, HypervisorCapabilitiesQuery};
use super::internal_lb::{InternalLbElement, InternalLbElementQuery};
use super::job::{self, AsyncJob, JobOutcome, JobWaiter};
use super::nic::{self, Nic, NicQuery};
use super::operation::OperationSpec;
use super::params::Params;
use super::resource::{self, ListQuery, ListResource, NamedResource};
use super::role::{NewRole, Role, RoleQuery};
use super::router::{Router, RouterQuery};
use super::session::{Session, Transport};
use super::utils::is_id;
use super::vnf::{NewVnfAppliance, VnfAppliance, VnfApplianceQuery, VnfTemplate, VnfTemplateQuery};
use super::waiter::Waiter;
use super::Result;

/// CloudStack cloud API.
///
/// Provides high-level API for working with CloudStack clouds.
#[derive(Debug, Clone)]
pub struct Cloud {
    session: Arc<Session>,
}

impl Cloud {
    /// Create a new cloud object with a given configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// fn cloud() -> cloudstack::Result<cloudstack::Cloud> {
    ///     let config = cloudstack::Config::new(
    ///         "https://cloud.example.com/client/api",
    ///         "api-key",
    ///         "secret-key",
    ///     )?;
    ///     cloudstack::Cloud::new(config)
    /// }
    ///
    /// # fn main() { cloud().unwrap(); }
    /// ```
    ///
    /// # See Also
    ///
    /// * [from_config](#method.from_config) to create a Cloud from cloudstack.yaml
    /// * [from_env](#method.from_env) to create a Cloud from environment variables
    pub fn new(config: Config) -> Result<Cloud> {
        Ok(Cloud {
            session: Arc::new(Session::new(config)?),
        })
    }

    /// Create a new cloud object using a custom transport.
    pub fn with_transport<T: Transport + 'static>(config: Config, transport: T) -> Cloud {
        Cloud {
            session: Arc::new(Session::new_with_transport(config, transport)),
        }
    }

    /// Create a new cloud object from a configuration file
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # fn cloud_from_config() -> cloudstack::Result<()> {
    /// let cs = cloudstack::Cloud::from_config("cloud-1")?;
    /// # Ok(()) }
    /// # fn main() { cloud_from_config().unwrap(); }
    /// ```
    pub fn from_config<S: AsRef<str>>(cloud_name: S) -> Result<Cloud> {
        Cloud::new(Config::from_config(cloud_name)?)
    }

    /// Create a new cloud object from environment variables.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # fn cloud_from_env() -> cloudstack::Result<()> {
    /// let cs = cloudstack::Cloud::from_env()?;
    /// # Ok(()) }
    /// # fn main() { cloud_from_env().unwrap(); }
    /// ```
    pub fn from_env() -> Result<Cloud> {
        Cloud::new(Config::from_env()?)
    }

    /// Add a hook applied to every list request made through this object.
    ///
    /// Default hooks run before hooks passed to individual calls.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let cs = cloudstack::Cloud::from_env()
    ///     .expect("Unable to create a cloud")
    ///     .with_default_hook(cloudstack::with_zone("zone-1"));
    /// ```
    pub fn with_default_hook(mut self, hook: ListHook) -> Cloud {
        Arc::make_mut(&mut self.session).add_default_hook(hook);
        self
    }

    /// Underlying session.
    #[inline]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Execute any operation and decode its result.
    ///
    /// The result is stripped of the operation's result key.
    pub fn execute<T: DeserializeOwned>(
        &self,
        spec: &OperationSpec,
        params: &Params,
    ) -> Result<JobOutcome<T>> {
        job::execute(&self.session, spec, params)
    }

    /// Execute any operation returning the raw JSON result.
    pub fn execute_raw(&self, spec: &OperationSpec, params: &Params) -> Result<JobOutcome<Value>> {
        job::dispatch(&self.session, spec, params)
    }

    /// Wait for a job started earlier.
    ///
    /// Useful after `ErrorKind::AsyncTimeout` or with the asynchronous mode
    /// disabled. The result is stripped of `result_key` if it is provided,
    /// otherwise it is returned as is.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let cs = cloudstack::Cloud::from_env().expect("Unable to create a cloud");
    /// let mut router = cs.get_router("r-1-VM").expect("Unable to get a router");
    /// if let Err(err) = router.reboot(false) {
    ///     if err.is_async_timeout() {
    ///         let job_id = err.job_id().expect("Job ID").clone();
    ///         let _ = cs.wait_for_job(job_id, Some("router")).expect("Job failed");
    ///     }
    /// }
    /// ```
    pub fn wait_for_job<S: Into<String>>(
        &self,
        job_id: S,
        result_key: Option<&'static str>,
    ) -> Result<Value> {
        JobWaiter::for_job_id(self.session.clone(), job_id, result_key).wait()
    }

    /// Query the current status of a job once.
    pub fn query_async_job_result<S: AsRef<str>>(&self, job_id: S) -> Result<AsyncJob> {
        job::query_async_job_result(&self.session, job_id)
    }

    /// Build a query against any resource list.
    #[inline]
    pub fn find<R: ListResource>(&self) -> ListQuery<R> {
        ListQuery::new(self.session.clone())
    }

    /// Find a resource by its ID.
    pub fn get_by_id<R: ListResource, S: AsRef<str>>(&self, id: S) -> Result<R> {
        resource::resolve_by_id::<R>(&self.session, id.as_ref(), &[]).map(|(item, _)| item)
    }

    /// Find a resource by its name.
    pub fn get_by_name<R: NamedResource, S: AsRef<str>>(&self, name: S) -> Result<R> {
        resource::resolve_by_name::<R>(&self.session, name.as_ref(), &[]).map(|(item, _)| item)
    }

    /// Find a resource by its ID or name.
    ///
    /// Values looking like IDs (UUIDs or numbers) are treated as IDs.
    pub fn get<R: NamedResource, S: AsRef<str>>(&self, id_or_name: S) -> Result<R> {
        if is_id(id_or_name.as_ref()) {
            self.get_by_id(id_or_name)
        } else {
            self.get_by_name(id_or_name)
        }
    }

    /// Resolve a name to an ID, returning it with the number of matches.
    pub fn resolve_id<R: NamedResource, S: AsRef<str>>(
        &self,
        name: S,
        hooks: &[ListHook],
    ) -> Result<(String, usize)> {
        resource::resolve_id::<R>(&self.session, name.as_ref(), hooks)
    }

    /// Find exactly one resource by its ID, returning it with the match count.
    pub fn resolve_by_id<R: ListResource, S: AsRef<str>>(
        &self,
        id: S,
        hooks: &[ListHook],
    ) -> Result<(R, usize)> {
        resource::resolve_by_id::<R>(&self.session, id.as_ref(), hooks)
    }

    /// Find exactly one resource by its name, returning it with the match count.
    pub fn resolve_by_name<R: NamedResource, S: AsRef<str>>(
        &self,
        name: S,
        hooks: &[ListHook],
    ) -> Result<(R, usize)> {
        resource::resolve_by_name::<R>(&self.session, name.as_ref(), hooks)
    }

    /// Build a query against role list.
    ///
    /// The returned object is a builder that should be used to construct
    /// the query.
    #[inline]
    pub fn find_roles(&self) -> RoleQuery {
        self.find()
    }

    /// Find a role by its name or ID.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let cs = cloudstack::Cloud::from_env().expect("Unable to create a cloud");
    /// let role = cs.get_role("Domain Admin").expect("Unable to get a role");
    /// ```
    pub fn get_role<Id: AsRef<str>>(&self, id_or_name: Id) -> Result<Role> {
        if is_id(id_or_name.as_ref()) {
            Role::load(self.session.clone(), id_or_name)
        } else {
            self.get_by_name(id_or_name)
        }
    }

    /// List all roles.
    pub fn list_roles(&self) -> Result<Vec<Role>> {
        self.find_roles().all()
    }

    /// Prepare a new role for creation.
    ///
    /// This call returns a `NewRole` object, which is a builder to populate
    /// role fields.
    pub fn new_role<S: Into<String>>(&self, name: S) -> NewRole {
        NewRole::new(self.session.clone(), name)
    }

    /// Build a query against virtual router list.
    #[inline]
    pub fn find_routers(&self) -> RouterQuery {
        self.find()
    }

    /// Find a virtual router by its name or ID.
    pub fn get_router<Id: AsRef<str>>(&self, id_or_name: Id) -> Result<Router> {
        if is_id(id_or_name.as_ref()) {
            Router::load(self.session.clone(), id_or_name)
        } else {
            self.get_by_name(id_or_name)
        }
    }

    /// List all virtual routers.
    pub fn list_routers(&self) -> Result<Vec<Router>> {
        self.find_routers().all()
    }

    /// Build a query against NICs of a virtual machine.
    pub fn find_nics<S: Into<String>>(&self, vm_id: S) -> NicQuery {
        ListQuery::new(self.session.clone()).with_hook(nic::for_virtual_machine(vm_id))
    }

    /// Find a NIC of a virtual machine by its ID.
    pub fn get_nic<V, Id>(&self, vm_id: V, id: Id) -> Result<Nic>
    where
        V: Into<String>,
        Id: AsRef<str>,
    {
        Nic::load(self.session.clone(), vm_id, id)
    }

    /// List hypervisors supported by the cloud.
    pub fn list_hypervisors(&self) -> Result<Vec<Hypervisor>> {
        hypervisor::list_hypervisors(&self.session, Params::new())
    }

    /// Build a query against hypervisor capabilities list.
    #[inline]
    pub fn find_hypervisor_capabilities(&self) -> HypervisorCapabilitiesQuery {
        self.find()
    }

    /// Find hypervisor capabilities by their ID.
    pub fn get_hypervisor_capabilities<Id: AsRef<str>>(
        &self,
        id: Id,
    ) -> Result<HypervisorCapabilities> {
        self.get_by_id(id)
    }

    /// Build a query against internal load balancer elements list.
    #[inline]
    pub fn find_internal_lb_elements(&self) -> InternalLbElementQuery {
        self.find()
    }

    /// Find an internal load balancer element by its ID.
    pub fn get_internal_lb_element<Id: AsRef<str>>(&self, id: Id) -> Result<InternalLbElement> {
        self.get_by_id(id)
    }

    /// Create an internal load balancer element for a network service provider.
    pub fn new_internal_lb_element<S: AsRef<str>>(
        &self,
        nsp_id: S,
    ) -> Result<JobOutcome<InternalLbElement>> {
        InternalLbElement::create(self.session.clone(), nsp_id)
    }

    /// Build a query against backup list.
    #[inline]
    pub fn find_backups(&self) -> BackupQuery {
        self.find()
    }

    /// Find a backup by its ID.
    pub fn get_backup<Id: AsRef<str>>(&self, id: Id) -> Result<Backup> {
        self.get_by_id(id)
    }

    /// Create a backup of a virtual machine.
    pub fn create_backup<S: AsRef<str>>(&self, vm_id: S) -> Result<JobOutcome<()>> {
        backup::create_backup(&self.session, vm_id)
    }

    /// Build a query against backup offering list.
    #[inline]
    pub fn find_backup_offerings(&self) -> BackupOfferingQuery {
        self.find()
    }

    /// Find a backup offering by its name or ID.
    pub fn get_backup_offering<Id: AsRef<str>>(&self, id_or_name: Id) -> Result<BackupOffering> {
        self.get(id_or_name)
    }

    /// Remove a virtual machine from its backup offering.
    pub fn remove_vm_from_backup_offering<S: AsRef<str>>(
        &self,
        vm_id: S,
        forced: bool,
    ) -> Result<JobOutcome<()>> {
        backup::remove_vm_from_offering(&self.session, vm_id, forced)
    }

    /// Build a query against VNF template list.
    ///
    /// Executable templates are listed unless `templatefilter` is set.
    #[inline]
    pub fn find_vnf_templates(&self) -> VnfTemplateQuery {
        self.find()
    }

    /// Find a VNF template by its name or ID.
    pub fn get_vnf_template<Id: AsRef<str>>(&self, id_or_name: Id) -> Result<VnfTemplate> {
        self.get(id_or_name)
    }

    /// Build a query against VNF appliance list.
    #[inline]
    pub fn find_vnf_appliances(&self) -> VnfApplianceQuery {
        self.find()
    }

    /// Find a VNF appliance by its name or ID.
    pub fn get_vnf_appliance<Id: AsRef<str>>(&self, id_or_name: Id) -> Result<VnfAppliance> {
        if is_id(id_or_name.as_ref()) {
            VnfAppliance::load(self.session.clone(), id_or_name)
        } else {
            self.get_by_name(id_or_name)
        }
    }

    /// Prepare a new VNF appliance for deployment.
    ///
    /// This call returns a `NewVnfAppliance` object, which is a builder to
    /// populate appliance fields.
    pub fn new_vnf_appliance<O, T, Z>(
        &self,
        service_offering_id: O,
        template_id: T,
        zone_id: Z,
    ) -> NewVnfAppliance
    where
        O: Into<String>,
        T: Into<String>,
        Z: Into<String>,
    {
        NewVnfAppliance::new(self.session.clone(), service_offering_id, template_id, zone_id)
    }
}

impl From<Session> for Cloud {
    fn from(value: Session) -> Cloud {
        Cloud {
            session: Arc::new(value),
        }
    }
}
