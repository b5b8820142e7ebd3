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

mod common;

use cloudstack::role::RoleType;
use cloudstack::{with_zone, ErrorKind, DEFAULT_PAGE_SIZE};
use serde_json::json;

use common::{job_succeeded, payload, set_up};

#[test]
fn test_role_lifecycle() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        json!({"createroleresponse": {"role": {
            "id": "11", "name": "operators", "type": "User", "ispublic": true
        }}}),
    );
    transport.push(
        200,
        json!({"updateroleresponse": {"role": {
            "id": "11", "name": "operators", "type": "User",
            "description": "Night shift", "ispublic": false
        }}}),
    );
    transport.push(200, json!({"deleteroleresponse": {"success": "true"}}));

    let mut role = cs
        .new_role("operators")
        .with_role_type(RoleType::User)
        .create()
        .unwrap();
    assert_eq!(role.id(), "11");

    role.set_description("Night shift");
    role.set_public(false);
    assert!(role.is_dirty());
    role.save().unwrap();
    assert!(!role.is_dirty());
    assert_eq!(role.description().as_deref(), Some("Night shift"));

    role.delete().unwrap();

    let requests = transport.requests();
    let update = payload(&requests[1]);
    assert!(update.contains("command=updateRole"));
    assert!(update.contains("description=Night%20shift"));
    assert!(update.contains("ispublic=false"));
    assert!(!update.contains("name="));
    assert!(payload(&requests[2]).contains("command=deleteRole"));
}

#[test]
fn test_role_delete_failure_reported() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        json!({"listrolesresponse": {"count": 1, "role": [{"id": "11", "name": "ops", "type": "User"}]}}),
    );
    transport.push(200, json!({"deleteroleresponse": {"success": false, "displaytext": "in use"}}));

    let role = cs.get_role("11").unwrap();
    let err = role.delete().err().unwrap();
    assert_eq!(err.kind(), ErrorKind::OperationFailed);
}

#[test]
fn test_list_all_follows_pages() {
    let (cs, transport) = set_up();
    let page_size = DEFAULT_PAGE_SIZE as usize;
    let first: Vec<_> = (0..page_size)
        .map(|i| json!({"id": format!("r-{}", i), "name": format!("r-{}-VM", i), "state": "Running"}))
        .collect();
    transport.push(
        200,
        json!({"listroutersresponse": {"count": page_size + 2, "router": first}}),
    );
    transport.push(
        200,
        json!({"listroutersresponse": {"count": page_size + 2, "router": [
            {"id": "r-x", "name": "r-x-VM", "state": "Stopped"},
            {"id": "r-y", "name": "r-y-VM", "state": "Stopped"}
        ]}}),
    );

    let routers = cs.list_routers().unwrap();
    assert_eq!(routers.len(), page_size + 2);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(payload(&requests[0]).contains("page=1&pagesize=500"));
    assert!(payload(&requests[1]).contains("page=2&pagesize=500"));
}

#[test]
fn test_nic_secondary_ips() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        json!({"listnicsresponse": {"count": 1, "nic": [{
            "id": "nic-1", "virtualmachineid": "vm-1", "ipaddress": "10.1.1.10",
            "isdefault": true, "secondaryip": []
        }]}}),
    );
    transport.push(200, json!({"addiptonicresponse": {"jobid": "job-1"}}));
    transport.push(
        200,
        job_succeeded(
            "job-1",
            json!({"nicsecondaryip": {"id": "ip-1", "ipaddress": "10.1.1.20", "nicid": "nic-1"}}),
        ),
    );
    transport.push(200, json!({"removeipfromnicresponse": {"jobid": "job-2"}}));
    transport.push(200, job_succeeded("job-2", json!({"success": true})));

    let mut nic = cs.get_nic("vm-1", "nic-1").unwrap();
    let ip = nic.add_secondary_ip(None).unwrap().finished().unwrap();
    assert_eq!(ip.ip_address, "10.1.1.20");
    assert_eq!(nic.secondary_ips().len(), 1);

    let err = nic.remove_secondary_ip("ip-unknown").err().unwrap();
    assert_eq!(err.kind(), ErrorKind::ResourceNotFound);

    assert!(nic.remove_secondary_ip("ip-1").unwrap().is_finished());
    assert!(nic.secondary_ips().is_empty());

    let requests = transport.requests();
    assert_eq!(requests.len(), 5);
    let list = payload(&requests[0]);
    assert!(list.contains("nicid=nic-1"));
    assert!(list.contains("virtualmachineid=vm-1"));
}

#[test]
fn test_hypervisors_respect_default_hooks() {
    let (cs, transport) = set_up();
    let cs = cs.with_default_hook(with_zone("zone-1"));
    transport.push(
        200,
        json!({"listhypervisorsresponse": {"count": 2, "hypervisor": [
            {"name": "KVM"}, {"name": "VMware"}
        ]}}),
    );

    let hypervisors = cs.list_hypervisors().unwrap();
    let names: Vec<_> = hypervisors.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["KVM", "VMware"]);
    assert!(payload(&transport.requests()[0]).contains("zoneid=zone-1"));
}

#[test]
fn test_hypervisor_capabilities_update() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        json!({"listhypervisorcapabilitiesresponse": {"count": 1, "hypervisorCapabilities": [{
            "id": "hc-1", "hypervisor": "KVM", "hypervisorversion": "default",
            "maxguestslimit": 50, "securitygroupenabled": true
        }]}}),
    );
    transport.push(
        200,
        json!({"updatehypervisorcapabilitiesresponse": {"hypervisorCapabilities": {
            "id": "hc-1", "hypervisor": "KVM", "hypervisorversion": "default",
            "maxguestslimit": 100, "securitygroupenabled": true
        }}}),
    );

    let mut caps = cs.get_hypervisor_capabilities("hc-1").unwrap();
    assert_eq!(caps.max_guests_limit(), Some(50));
    caps.set_max_guests_limit(100);
    caps.save().unwrap();
    assert_eq!(caps.max_guests_limit(), Some(100));

    let update = payload(&transport.requests()[1]);
    assert!(update.contains("command=updateHypervisorCapabilities"));
    assert!(update.contains("maxguestslimit=100"));
}

#[test]
fn test_internal_lb_element() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        json!({"createinternalloadbalancerelementresponse": {"jobid": "job-1", "id": "e-1"}}),
    );
    transport.push(
        200,
        job_succeeded(
            "job-1",
            json!({"internalloadbalancerelement": {"id": "e-1", "enabled": false, "nspid": "nsp-1"}}),
        ),
    );
    transport.push(
        200,
        json!({"configureinternalloadbalancerelementresponse": {"jobid": "job-2"}}),
    );
    transport.push(
        200,
        job_succeeded(
            "job-2",
            json!({"internalloadbalancerelement": {"id": "e-1", "enabled": true, "nspid": "nsp-1"}}),
        ),
    );

    let mut element = cs
        .new_internal_lb_element("nsp-1")
        .unwrap()
        .finished()
        .unwrap();
    assert!(!element.enabled());
    assert!(element.set_enabled(true).unwrap().is_finished());
    assert!(element.enabled());

    let configure = payload(&transport.requests()[2]);
    assert!(configure.contains("enabled=true"));
    assert!(configure.contains("id=e-1"));
}

#[test]
fn test_backup_offering_by_name() {
    let (cs, transport) = set_up();
    transport.push(
        200,
        json!({"listbackupofferingsresponse": {"count": 1, "backupoffering": [
            {"id": "o-1", "name": "Gold", "allowuserdrivenbackups": "true"}
        ]}}),
    );
    transport.push(
        200,
        json!({"listbackupofferingsresponse": {"count": 1, "backupoffering": [
            {"id": "o-1", "name": "Gold", "allowuserdrivenbackups": "true"}
        ]}}),
    );
    transport.push(
        200,
        json!({"removevirtualmachinefrombackupofferingresponse": {"jobid": "job-1"}}),
    );
    transport.push(200, job_succeeded("job-1", json!({"success": true})));

    let offering = cs.get_backup_offering("Gold").unwrap();
    assert_eq!(offering.allow_user_driven_backups(), Some(true));
    assert!(payload(&transport.requests()[0]).contains("keyword=Gold"));

    assert!(cs
        .remove_vm_from_backup_offering("vm-1", true)
        .unwrap()
        .is_finished());
    let body = payload(&transport.requests()[2]);
    assert!(body.contains("forced=true"));
    assert!(body.contains("virtualmachineid=vm-1"));
}

#[test]
fn test_vnf_appliance_by_name() {
    let (cs, transport) = set_up();
    let appliance = json!({"id": "vm-7", "name": "fw", "state": "Running",
                           "vnfdetails": {"vendor": "acme"}});
    transport.push(
        200,
        json!({"listvnfappliancesresponse": {"count": 1, "virtualmachine": [appliance.clone()]}}),
    );
    transport.push(
        200,
        json!({"listvnfappliancesresponse": {"count": 1, "virtualmachine": [appliance]}}),
    );

    let found = cs.get_vnf_appliance("fw").unwrap();
    assert_eq!(found.id(), "vm-7");
    assert_eq!(found.vnf_details().get("vendor").map(String::as_str), Some("acme"));
}
