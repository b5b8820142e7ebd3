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

//! Internal load balancer elements.

use std::sync::Arc;

use super::super::common::Refresh;
use super::super::job::{execute, JobOutcome};
use super::super::operation::OperationSpec;
use super::super::params::Params;
use super::super::resource::{resolve_by_id, ListQuery, ListResource};
use super::super::session::Session;
use super::super::Result;
use super::{api, protocol};

/// A query to internal load balancer element list.
pub type InternalLbElementQuery = ListQuery<InternalLbElement>;

/// An internal load balancer element.
#[derive(Clone, Debug)]
pub struct InternalLbElement {
    session: Arc<Session>,
    inner: protocol::InternalLbElement,
}

impl InternalLbElement {
    fn new(session: Arc<Session>, inner: protocol::InternalLbElement) -> InternalLbElement {
        InternalLbElement { session, inner }
    }

    /// Create an element for a network service provider.
    pub(crate) fn create<S: AsRef<str>>(
        session: Arc<Session>,
        nsp_id: S,
    ) -> Result<JobOutcome<InternalLbElement>> {
        debug!("Creating an internal LB element for {}", nsp_id.as_ref());
        let params = Params::new().with("nspid", nsp_id.as_ref());
        let outcome = execute::<protocol::InternalLbElement>(
            &session,
            &api::CREATE_INTERNAL_LB_ELEMENT,
            &params,
        )?;
        Ok(outcome.map(|inner| InternalLbElement::new(session, inner)))
    }

    transparent_property! {
        #[doc = "Whether the element is enabled."]
        enabled: bool
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "ID of the network service provider."]
        nsp_id: ref Option<String>
    }

    /// Enable or disable the element.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<JobOutcome<()>> {
        let params = Params::new()
            .with("id", self.inner.id.as_str())
            .with("enabled", enabled);
        let outcome = execute::<protocol::InternalLbElement>(
            &self.session,
            &api::CONFIGURE_INTERNAL_LB_ELEMENT,
            &params,
        )?;
        Ok(match outcome {
            JobOutcome::Finished(inner) => {
                self.inner = inner;
                JobOutcome::Finished(())
            }
            JobOutcome::Started(handle) => JobOutcome::Started(handle),
        })
    }
}

impl Refresh for InternalLbElement {
    /// Refresh the element.
    fn refresh(&mut self) -> Result<()> {
        let (element, _) = resolve_by_id::<InternalLbElement>(&self.session, &self.inner.id, &[])?;
        self.inner = element.inner;
        Ok(())
    }
}

impl ListResource for InternalLbElement {
    type Inner = protocol::InternalLbElement;
    const LIST: &'static OperationSpec = &api::LIST_INTERNAL_LB_ELEMENTS;
    const LIST_KEY: &'static str = "internalloadbalancerelement";

    fn from_inner(session: &Arc<Session>, inner: protocol::InternalLbElement) -> InternalLbElement {
        InternalLbElement::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}
