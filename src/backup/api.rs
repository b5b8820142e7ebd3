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

//! Foundation bits exposing the backup and recovery API.

use std::sync::Arc;

use super::super::common::protocol::SuccessResponse;
use super::super::job::{execute, JobOutcome};
use super::super::operation::{FieldKind, FieldSpec, OperationSpec, Verb};
use super::super::params::Params;
use super::super::session::Session;
use super::super::Result;

/// List backups.
pub static LIST_BACKUPS: OperationSpec = OperationSpec {
    name: "listBackups",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::optional("account", FieldKind::Str),
        FieldSpec::optional("domainid", FieldKind::Str),
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("isrecursive", FieldKind::Bool),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("listall", FieldKind::Bool),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
        FieldSpec::optional("projectid", FieldKind::Str),
        FieldSpec::optional("virtualmachineid", FieldKind::Str),
        FieldSpec::optional("zoneid", FieldKind::Str),
    ],
};

/// Create a backup of a virtual machine.
pub static CREATE_BACKUP: OperationSpec = OperationSpec {
    name: "createBackup",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: None,
    fields: &[FieldSpec::required("virtualmachineid", FieldKind::Str)],
};

/// Restore a virtual machine from a backup.
pub static RESTORE_BACKUP: OperationSpec = OperationSpec {
    name: "restoreBackup",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: None,
    fields: &[FieldSpec::required("id", FieldKind::Str)],
};

/// Delete a backup.
pub static DELETE_BACKUP: OperationSpec = OperationSpec {
    name: "deleteBackup",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: None,
    fields: &[
        FieldSpec::required("id", FieldKind::Str),
        FieldSpec::optional("forced", FieldKind::Bool),
    ],
};

/// List backup offerings.
pub static LIST_BACKUP_OFFERINGS: OperationSpec = OperationSpec {
    name: "listBackupOfferings",
    verb: Verb::Read,
    asynchronous: false,
    result_key: None,
    fields: &[
        FieldSpec::optional("id", FieldKind::Str),
        FieldSpec::optional("keyword", FieldKind::Str),
        FieldSpec::optional("page", FieldKind::Int),
        FieldSpec::optional("pagesize", FieldKind::Int),
        FieldSpec::optional("zoneid", FieldKind::Str),
    ],
};

/// Assign a virtual machine to a backup offering.
pub static ASSIGN_VM_TO_BACKUP_OFFERING: OperationSpec = OperationSpec {
    name: "assignVirtualMachineToBackupOffering",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: None,
    fields: &[
        FieldSpec::required("backupofferingid", FieldKind::Str),
        FieldSpec::required("virtualmachineid", FieldKind::Str),
    ],
};

/// Remove a virtual machine from its backup offering.
pub static REMOVE_VM_FROM_BACKUP_OFFERING: OperationSpec = OperationSpec {
    name: "removeVirtualMachineFromBackupOffering",
    verb: Verb::Mutate,
    asynchronous: true,
    result_key: None,
    fields: &[
        FieldSpec::required("virtualmachineid", FieldKind::Str),
        FieldSpec::optional("forced", FieldKind::Bool),
    ],
};

/// Run an operation that only reports success.
pub fn run(session: &Arc<Session>, spec: &OperationSpec, params: &Params) -> Result<JobOutcome<()>> {
    debug!("Running {} with {:?}", spec.name, params);
    execute::<SuccessResponse>(session, spec, params)?
        .and_then(|resp| resp.into_result(spec.name))
}

/// Create a backup of a virtual machine.
pub fn create_backup<S: AsRef<str>>(session: &Arc<Session>, vm_id: S) -> Result<JobOutcome<()>> {
    let params = Params::new().with("virtualmachineid", vm_id.as_ref());
    run(session, &CREATE_BACKUP, &params)
}

/// Remove a virtual machine from its backup offering.
pub fn remove_vm_from_offering<S: AsRef<str>>(
    session: &Arc<Session>,
    vm_id: S,
    forced: bool,
) -> Result<JobOutcome<()>> {
    let mut params = Params::new().with("virtualmachineid", vm_id.as_ref());
    if forced {
        let _ = params.set("forced", true);
    }
    run(session, &REMOVE_VM_FROM_BACKUP_OFFERING, &params)
}
