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

//! Virtual routers management.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use super::super::common::Refresh;
use super::super::job::{execute, JobOutcome};
use super::super::operation::OperationSpec;
use super::super::params::Params;
use super::super::resource::{resolve_by_id, ListQuery, ListResource, NamedResource};
use super::super::session::Session;
use super::super::Result;
use super::{api, protocol};

/// A query to router list.
pub type RouterQuery = ListQuery<Router>;

/// Structure representing a single virtual router.
#[derive(Clone, Debug)]
pub struct Router {
    session: Arc<Session>,
    inner: protocol::Router,
}

impl Router {
    fn new(session: Arc<Session>, inner: protocol::Router) -> Router {
        Router { session, inner }
    }

    /// Load a Router object.
    pub(crate) fn load<Id: AsRef<str>>(session: Arc<Session>, id: Id) -> Result<Router> {
        let (router, _) = resolve_by_id::<Router>(&session, id.as_ref(), &[])?;
        Ok(router)
    }

    transparent_property! {
        #[doc = "Account owning the router."]
        account: ref Option<String>
    }

    transparent_property! {
        #[doc = "Creation date and time (if available)."]
        created: Option<DateTime<FixedOffset>>
    }

    transparent_property! {
        #[doc = "ID of the domain of the router."]
        domain_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Guest IP address."]
        guest_ip_address: ref Option<String>
    }

    transparent_property! {
        #[doc = "ID of the host the router runs on."]
        host_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Whether the router is part of a redundant pair."]
        is_redundant: Option<bool>
    }

    transparent_property! {
        #[doc = "Link local IP address."]
        link_local_ip: ref Option<String>
    }

    transparent_property! {
        #[doc = "Router name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "Public IP address."]
        public_ip: ref Option<String>
    }

    transparent_property! {
        #[doc = "Redundancy state (for redundant routers)."]
        redundant_state: ref Option<String>
    }

    transparent_property! {
        #[doc = "Whether the router needs to be upgraded."]
        requires_upgrade: Option<bool>
    }

    transparent_property! {
        #[doc = "Role of the router."]
        role: ref Option<String>
    }

    transparent_property! {
        #[doc = "Current state."]
        state: protocol::RouterState
    }

    transparent_property! {
        #[doc = "Template version."]
        version: ref Option<String>
    }

    transparent_property! {
        #[doc = "ID of the VPC (for VPC routers)."]
        vpc_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "ID of the zone."]
        zone_id: ref Option<String>
    }

    /// Start the router.
    ///
    /// Waits for the job unless the asynchronous mode is disabled.
    pub fn start(&mut self) -> Result<JobOutcome<()>> {
        let params = Params::new().with("id", self.inner.id.as_str());
        self.run(&api::START_ROUTER, &params)
    }

    /// Stop the router.
    pub fn stop(&mut self, forced: bool) -> Result<JobOutcome<()>> {
        let mut params = Params::new().with("id", self.inner.id.as_str());
        if forced {
            let _ = params.set("forced", true);
        }
        self.run(&api::STOP_ROUTER, &params)
    }

    /// Reboot the router.
    pub fn reboot(&mut self, forced: bool) -> Result<JobOutcome<()>> {
        let mut params = Params::new().with("id", self.inner.id.as_str());
        if forced {
            let _ = params.set("forced", true);
        }
        self.run(&api::REBOOT_ROUTER, &params)
    }

    /// Destroy the router.
    pub fn destroy(mut self) -> Result<JobOutcome<()>> {
        let params = Params::new().with("id", self.inner.id.as_str());
        self.run(&api::DESTROY_ROUTER, &params)
    }

    fn run(&mut self, spec: &OperationSpec, params: &Params) -> Result<JobOutcome<()>> {
        debug!("Running {} on router {}", spec.name, self.inner.id);
        let outcome = execute::<protocol::Router>(&self.session, spec, params)?;
        Ok(match outcome {
            JobOutcome::Finished(inner) => {
                debug!("Router {} is now {}", inner.id, inner.state);
                self.inner = inner;
                JobOutcome::Finished(())
            }
            JobOutcome::Started(handle) => JobOutcome::Started(handle),
        })
    }
}

impl Refresh for Router {
    /// Refresh the router.
    fn refresh(&mut self) -> Result<()> {
        let (router, _) = resolve_by_id::<Router>(&self.session, &self.inner.id, &[])?;
        self.inner = router.inner;
        Ok(())
    }
}

impl ListResource for Router {
    type Inner = protocol::Router;
    const LIST: &'static OperationSpec = &api::LIST_ROUTERS;
    const LIST_KEY: &'static str = "router";

    fn from_inner(session: &Arc<Session>, inner: protocol::Router) -> Router {
        Router::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}

impl NamedResource for Router {
    fn resource_name(&self) -> &str {
        &self.inner.name
    }
}
