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

use std::env;

use cloudstack::JobOutcome;

fn main() {
    env_logger::init();

    let cs = cloudstack::Cloud::from_env()
        .expect("Failed to create a cloud from the environment");

    let vm_id = env::args().nth(1).expect("Provide a virtual machine ID");
    match cs.create_backup(&vm_id).expect("Cannot create a backup") {
        JobOutcome::Finished(()) => {
            let backups = cs
                .find_backups()
                .with("virtualmachineid", vm_id.as_str())
                .all()
                .expect("Cannot list backups");
            for backup in backups {
                println!(
                    "ID = {}, Date = {:?}, Status = {:?}, Size = {:?}",
                    backup.id(),
                    backup.date(),
                    backup.status(),
                    backup.size()
                );
            }
        }
        JobOutcome::Started(handle) => println!("Started job {}", handle.jobid),
    }
}
