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

//! Backups and backup offerings.

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

/// A query to backup list.
pub type BackupQuery = ListQuery<Backup>;

/// A query to backup offering list.
pub type BackupOfferingQuery = ListQuery<BackupOffering>;

/// A backup of a virtual machine.
#[derive(Clone, Debug)]
pub struct Backup {
    session: Arc<Session>,
    inner: protocol::Backup,
}

/// A backup offering.
#[derive(Clone, Debug)]
pub struct BackupOffering {
    session: Arc<Session>,
    inner: protocol::BackupOffering,
}

impl Backup {
    fn new(session: Arc<Session>, inner: protocol::Backup) -> Backup {
        Backup { session, inner }
    }

    transparent_property! {
        #[doc = "ID of the backup offering used."]
        backup_offering_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Backup type (e.g. `FULL`)."]
        backup_type: ref Option<String>
    }

    transparent_property! {
        #[doc = "Date and time of the backup."]
        date: Option<DateTime<FixedOffset>>
    }

    transparent_property! {
        #[doc = "ID in the backup provider."]
        external_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Size in bytes."]
        size: Option<i64>
    }

    transparent_property! {
        #[doc = "Backup status."]
        status: ref Option<String>
    }

    transparent_property! {
        #[doc = "ID of the virtual machine."]
        virtual_machine_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Virtual size in bytes."]
        virtual_size: Option<i64>
    }

    transparent_property! {
        #[doc = "ID of the zone."]
        zone_id: ref Option<String>
    }

    /// Restore the virtual machine from this backup.
    pub fn restore(&self) -> Result<JobOutcome<()>> {
        let params = Params::new().with("id", self.inner.id.as_str());
        api::run(&self.session, &api::RESTORE_BACKUP, &params)
    }

    /// Delete the backup.
    pub fn delete(self, forced: bool) -> Result<JobOutcome<()>> {
        let mut params = Params::new().with("id", self.inner.id.as_str());
        if forced {
            let _ = params.set("forced", true);
        }
        api::run(&self.session, &api::DELETE_BACKUP, &params)
    }
}

impl Refresh for Backup {
    /// Refresh the backup.
    fn refresh(&mut self) -> Result<()> {
        let (backup, _) = resolve_by_id::<Backup>(&self.session, &self.inner.id, &[])?;
        self.inner = backup.inner;
        Ok(())
    }
}

impl ListResource for Backup {
    type Inner = protocol::Backup;
    const LIST: &'static OperationSpec = &api::LIST_BACKUPS;
    const LIST_KEY: &'static str = "backup";

    fn from_inner(session: &Arc<Session>, inner: protocol::Backup) -> Backup {
        Backup::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}

impl BackupOffering {
    fn new(session: Arc<Session>, inner: protocol::BackupOffering) -> BackupOffering {
        BackupOffering { session, inner }
    }

    transparent_property! {
        #[doc = "Whether users may create backups themselves."]
        allow_user_driven_backups: Option<bool>
    }

    transparent_property! {
        #[doc = "Creation date and time."]
        created: Option<DateTime<FixedOffset>>
    }

    transparent_property! {
        #[doc = "Description."]
        description: ref Option<String>
    }

    transparent_property! {
        #[doc = "ID in the backup provider."]
        external_id: ref Option<String>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Offering name."]
        name: ref String
    }

    transparent_property! {
        #[doc = "ID of the zone."]
        zone_id: ref Option<String>
    }

    /// Assign a virtual machine to this offering.
    pub fn assign<S: AsRef<str>>(&self, vm_id: S) -> Result<JobOutcome<()>> {
        let params = Params::new()
            .with("backupofferingid", self.inner.id.as_str())
            .with("virtualmachineid", vm_id.as_ref());
        api::run(&self.session, &api::ASSIGN_VM_TO_BACKUP_OFFERING, &params)
    }
}

impl ListResource for BackupOffering {
    type Inner = protocol::BackupOffering;
    const LIST: &'static OperationSpec = &api::LIST_BACKUP_OFFERINGS;
    const LIST_KEY: &'static str = "backupoffering";

    fn from_inner(session: &Arc<Session>, inner: protocol::BackupOffering) -> BackupOffering {
        BackupOffering::new(session.clone(), inner)
    }

    fn resource_id(&self) -> &str {
        &self.inner.id
    }
}

impl NamedResource for BackupOffering {
    const NAME_FILTER: &'static str = "keyword";

    fn resource_name(&self) -> &str {
        &self.inner.name
    }
}

#[cfg(test)]
pub mod test {
    use std::sync::Arc;

    use serde_json::json;

    use super::super::api::create_backup;
    use super::{Backup, BackupOffering};
    use crate::resource::{resolve_by_name, ListQuery};
    use crate::session::test::{new_config, FakeTransport};
    use crate::{ErrorKind, Session};

    fn job(status: i64, result: serde_json::Value) -> serde_json::Value {
        json!({"queryasyncjobresultresponse": {
            "jobid": "job-1", "jobstatus": status, "jobresult": result
        }})
    }

    #[test]
    fn test_create_backup() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, json!({"createbackupresponse": {"jobid": "job-1"}}));
        transport.push(200, job(1, json!({"success": true})));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));
        assert!(create_backup(&session, "vm-1").unwrap().is_finished());
    }

    #[test]
    fn test_create_backup_reported_failure() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(200, json!({"createbackupresponse": {"jobid": "job-1"}}));
        transport.push(
            200,
            job(1, json!({"success": false, "displaytext": "provider is down"})),
        );
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));
        let err = create_backup(&session, "vm-1").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::OperationFailed);
        assert!(err.to_string().contains("provider is down"));
    }

    #[test]
    fn test_restore_backup() {
        let transport = Arc::new(FakeTransport::new());
        transport.push(
            200,
            json!({"listbackupsresponse": {"count": 1, "backup": [{
                "id": "b-1", "virtualmachineid": "vm-1", "status": "BackedUp",
                "size": 1024, "date": "2024-05-01T00:00:00+0000"
            }]}}),
        );
        transport.push(200, json!({"restorebackupresponse": {"jobid": "job-1"}}));
        transport.push(200, job(1, json!({"success": "true"})));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));

        let backup = ListQuery::<Backup>::new(session)
            .with("virtualmachineid", "vm-1")
            .one()
            .unwrap();
        assert_eq!(backup.size(), Some(1024));
        assert!(backup.date().is_some());
        assert!(backup.restore().unwrap().is_finished());
    }

    #[test]
    fn test_offering_by_name_and_assign() {
        let transport = Arc::new(FakeTransport::new());
        let offerings = json!({"listbackupofferingsresponse": {"count": 2, "backupoffering": [
            {"id": "o-1", "name": "Gold"},
            {"id": "o-2", "name": "Gold Plus"}
        ]}});
        transport.push(200, offerings);
        transport.push(
            200,
            json!({"listbackupofferingsresponse": {"count": 1, "backupoffering": [
                {"id": "o-1", "name": "Gold"}
            ]}}),
        );
        transport.push(
            200,
            json!({"assignvirtualmachinetobackupofferingresponse": {"jobid": "job-1"}}),
        );
        transport.push(200, job(1, json!({"success": true})));
        let session = Arc::new(Session::new_with_transport(new_config(), transport.clone()));

        let (offering, _) = resolve_by_name::<BackupOffering>(&session, "Gold", &[]).unwrap();
        assert_eq!(offering.id(), "o-1");
        assert!(offering.assign("vm-1").unwrap().is_finished());

        let requests = transport.requests.lock().unwrap();
        assert!(requests[0].url.query().unwrap().contains("keyword=Gold"));
        let body = requests[2].body.as_ref().unwrap();
        assert!(body.contains("backupofferingid=o-1"));
        assert!(body.contains("virtualmachineid=vm-1"));
    }
}
