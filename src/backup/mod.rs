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

//! Backup and recovery API implementation bits.

mod api;
mod backups;
mod protocol;

pub(crate) use self::api::{create_backup, remove_vm_from_offering};
pub use self::api::{
    ASSIGN_VM_TO_BACKUP_OFFERING, CREATE_BACKUP, DELETE_BACKUP, LIST_BACKUPS,
    LIST_BACKUP_OFFERINGS, REMOVE_VM_FROM_BACKUP_OFFERING, RESTORE_BACKUP,
};
pub use self::backups::{Backup, BackupOffering, BackupOfferingQuery, BackupQuery};
