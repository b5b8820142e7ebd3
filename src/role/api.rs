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

//! Foundation bits exposing the roles API.

use std::sync::Arc;

use super::super::common::protocol::SuccessResponse;
use super::super::job::execute_sync;
use super::super::operation::{FieldKind, FieldSpec, OperationSpec, Verb};
use super::super::params::Params;
use super::super::session::Session;
use super::super::Result;
use super::protocol::Role;

/// List roles.
pub static LIST_ROLES: OperationSpec = OperationSpec {
    name: "listRoles",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("name", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
        FieldSpec::optional("state", FieldKind::Str),
        FieldSpec::optional("type", FieldKind::Str),
    ],
};

/// Create a role, either from scratch or as a copy of another one.
pub static CREATE_ROLE: OperationSpec = OperationSpec {
    name: "createRole",
    verb: Verb::Mutate,
    asynchronous: false,
    result_key: Some("role"),
    fields: &[
        FieldSpec::required("name", FieldKind::Str),
        FieldSpec::optional("description", FieldKind::Str),
        FieldSpec::optional("ispublic", FieldKind::Bool),
        FieldSpec::optional("roleid", FieldKind::Str),
        FieldSpec::optional("type", FieldKind::Str),
    ],
};

/// Update a role.
pub static UPDATE_ROLE: OperationSpec = OperationSpec {
    name: "updateRole",
    verb: Verb::Mutate,
    asynchronous: false,
    result_key: Some("role"),
    fields: &[
        FieldSpec::required("id", FieldKind::Str),
        FieldSpec::optional("description", FieldKind::Str),
        FieldSpec::optional("ispublic", FieldKind::Bool),
        FieldSpec::optional("name", FieldKind::Str),
        FieldSpec::optional("type", FieldKind::Str),
    ],
};

/// Delete a role.
pub static DELETE_ROLE: OperationSpec = OperationSpec {
    name: "deleteRole",
    verb: Verb::Mutate,
    asynchronous: false,
    result_key: None,
    fields: &[FieldSpec::required("id", FieldKind::Str)],
};

/// Create a role.
pub fn create_role(session: &Arc<Session>, params: &Params) -> Result<Role> {
    debug!("Creating a role with {:?}", params);
    let role: Role = execute_sync(session, &CREATE_ROLE, params)?;
    debug!("Created role {:?}", role);
    Ok(role)
}

/// Update a role.
pub fn update_role(session: &Arc<Session>, params: &Params) -> Result<Role> {
    debug!("Updating a role with {:?}", params);
    execute_sync(session, &UPDATE_ROLE, params)
}

/// Delete a role.
pub fn delete_role<S: AsRef<str>>(session: &Arc<Session>, id: S) -> Result<()> {
    debug!("Deleting role {}", id.as_ref());
    let params = Params::new().with("id", id.as_ref());
    let resp: SuccessResponse = execute_sync(session, &DELETE_ROLE, &params)?;
    resp.into_result(DELETE_ROLE.name)
}
