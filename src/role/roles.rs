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

//! Roles management via the roles API.

use std::sync::Arc;

use super::super::common::Refresh;
use super::super::operation::OperationSpec;
use super::super::params::Params;
use super::super::resource::{resolve_by_id, ListQuery, ListResource, NamedResource};
use super::super::session::Session;
use super::super::Result;
use super::{api, protocol};

/// A query to role list.
pub type RoleQuery = ListQuery<Role>;

/// Structure representing a single role.
#[derive(Clone, Debug)]
pub struct Role {
    session: Arc<Session>,
    inner: protocol::Role,
    dirty: Params,
}

/// A request to create a role.
#[derive(Clone, Debug)]
pub struct NewRole {
    session: Arc<Session>,
    params: Params,
}

impl Role {
    fn new(session: Arc<Session>, inner: protocol::Role) -> Role {
        Role {
            session,
            inner,
            dirty: Params::new(),
        }
    }

    /// Load a Role object.
    pub(crate) fn load<Id: AsRef<str>>(session: Arc<Session>, id: Id) -> Result<Role> {
        let (role, _) = resolve_by_id::<Role>(&session, id.as_ref(), &[])?;
        Ok(role)
    }

    transparent_property! {
        #[doc = "Role description (if any)."]
        description: ref Option<String>
    }

    /// Update the description.
    pub fn set_description<S: Into<String>>(&mut self, value: S) {
        let value = value.into();
        let _ = self.dirty.set("description", value.as_str());
        self.inner.description = Some(value);
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Whether this is one of the built-in roles."]
        is_default: Option<bool>
    }

    transparent_property! {
        #[doc = "Whether the role is visible to domain administrators."]
        is_public: Option<bool>
    }

    /// Update whether the role is public.
    pub fn set_public(&mut self, value: bool) {
        let _ = self.dirty.set("ispublic", value);
        self.inner.is_public = Some(value);
    }

    transparent_property! {
        #[doc = "Role name."]
        name: ref String
    }

    /// Update the name.
    pub fn set_name<S: Into<String>>(&mut self, value: S) {
        let value = value.into();
        let _ = self.dirty.set("name", value.as_str());
        self.inner.name = value;
    }

    transparent_property! {
        #[doc = "Type of the role."]
        role_type: protocol::RoleType
    }

    transparent_property! {
        #[doc = "State of the role (if reported)."]
        state: ref Option<String>
    }

    /// Delete the role.
    pub fn delete(self) -> Result<()> {
        api::delete_role(&self.session, &self.inner.id)
    }

    /// Whether the role is modified.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Save the changes to the role.
    pub fn save(&mut self) -> Result<()> {
        if self.dirty.is_empty() {
            return Ok(());
        }

        let mut params = self.dirty.clone();
        let _ = params.set("id", self.inner.id.as_str());
        self.inner = api::update_role(&self.session, &params)?;
        self.dirty = Params::new();
        Ok(())
    }
}

impl Refresh for Role {
    /// Refresh the role.
    fn refresh(&mut self) -> Result<()> {
        let (role, _) = resolve_by_id::<Role>(&self.session, &self.inner.id, &[])?;
        self.inner = role.inner;
        self.dirty = Params::new();
        Ok(())
    }
}

impl ListResource for Role {
    type Inner = protocol::Role;
    const LIST: &'static OperationSpec = &api::LIST_ROLES;
    const LIST_KEY: &'static str = "role";

    fn from_inner(session: &Arc<Session>, inner: protocol::Role) -> Role {
        Role::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}

impl NamedResource for Role {
    fn resource_name(&self) -> &str {
        &self.inner.name
    }
}

impl NewRole {
    /// Start creating a role.
    pub(crate) fn new<S: Into<String>>(session: Arc<Session>, name: S) -> NewRole {
        NewRole {
            session,
            params: Params::new().with("name", name.into()),
        }
    }

    /// Request creation of the role.
    pub fn create(self) -> Result<Role> {
        let inner = api::create_role(&self.session, &self.params)?;
        Ok(Role::new(self.session, inner))
    }

    request_param! {
        #[doc = "Set a description."]
        set_description, with_description -> "description", String
    }

    request_param! {
        #[doc = "Set whether the role is visible to domain administrators."]
        set_public, with_public -> "ispublic", bool
    }

    request_param! {
        #[doc = "Copy permissions from another role (by ID)."]
        set_source_role, with_source_role -> "roleid", String
    }

    request_param! {
        #[doc = "Set the role type."]
        set_role_type, with_role_type -> "type", protocol::RoleType
    }
}

#[cfg(test)]
pub mod test {
    use std::sync::Arc;

    use serde_json::json;

    use super::super::protocol::RoleType;
    use super::{NewRole, Role};
    use crate::common::Refresh;
    use crate::session::test::{new_config, FakeTransport};
    use crate::Session;

    fn role_json(name: &str) -> serde_json::Value {
        json!({
            "id": "c7a3f2f6-1b3e-4a49-8a5c-2f0c3f6b8e9d",
            "name": name,
            "type": "DomainAdmin",
            "description": "Default domain admin role",
            "ispublic": true,
            "isdefault": "false",
        })
    }

    #[test]
    fn test_create_role() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, json!({"createroleresponse": {"role": role_json("ops")}}));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));

        let role = NewRole::new(session, "ops")
            .with_role_type(RoleType::DomainAdmin)
            .with_description("Operators")
            .create()
            .unwrap();
        assert_eq!(role.name(), "ops");
        assert_eq!(role.role_type(), RoleType::DomainAdmin);
        assert_eq!(role.is_public(), Some(true));
        assert_eq!(role.is_default(), Some(false));

        let requests = transport.requests.lock().unwrap();
        let body = requests[0].body.as_ref().unwrap();
        assert!(body.contains("command=createRole"));
        assert!(body.contains("description=Operators"));
        assert!(body.contains("type=DomainAdmin"));
    }

    #[test]
    fn test_save_sends_only_changes() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, json!({"updateroleresponse": {"role": role_json("renamed")}}));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));
        let mut role = Role::new(session, serde_json::from_value(role_json("ops")).unwrap());

        role.save().unwrap();
        assert!(transport.requests.lock().unwrap().is_empty());

        role.set_name("renamed");
        assert!(role.is_dirty());
        role.save().unwrap();
        assert!(!role.is_dirty());
        assert_eq!(role.name(), "renamed");

        let requests = transport.requests.lock().unwrap();
        let body = requests[0].body.as_ref().unwrap();
        assert!(body.contains("name=renamed"));
        assert!(!body.contains("description="));
    }

    #[test]
    fn test_refresh_and_delete() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(
            200,
            json!({"listrolesresponse": {"count": 1, "role": [role_json("fresh")]}}),
        );
        transport.push(200, json!({"deleteroleresponse": {"success": "true"}}));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));
        let mut role = Role::new(session, serde_json::from_value(role_json("ops")).unwrap());

        role.refresh().unwrap();
        assert_eq!(role.name(), "fresh");
        role.delete().unwrap();
        assert_eq!(transport.requests.lock().unwrap().len(), 2);
    }
}
