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

    let id_or_name = env::args().nth(1).expect("Provide a router ID or name");
    let forced = env::args().nth(2).map(|arg| arg == "--force").unwrap_or(false);
    let mut router = cs.get_router(id_or_name).expect("Cannot get a router");

    match router.reboot(forced) {
        Ok(JobOutcome::Finished(())) => {
            println!("Router {} is {}", router.name(), router.state())
        }
        Ok(JobOutcome::Started(handle)) => println!("Started job {}", handle.jobid),
        Err(err) if err.is_async_timeout() => {
            let job_id = err.job_id().expect("Timeout without a job ID").clone();
            println!("Still rebooting, waiting more for job {}", job_id);
            let _ = cs
                .wait_for_job(job_id, Some("router"))
                .expect("Failed to reboot the router");
        }
        Err(err) => panic!("Failed to reboot the router: {}", err),
    }
}
