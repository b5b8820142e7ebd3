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

fn main() {
    env_logger::init();

    let cs = cloudstack::Cloud::from_env()
        .expect("Failed to create a cloud from the environment");

    let id_or_name = env::args().nth(1).expect("Provide a router ID or name");
    let router = cs.get_router(id_or_name).expect("Cannot get a router");

    println!(
        "ID = {}, Name = {}, State = {}, Zone = {:?}, Public IP = {:?}, Redundant state = {:?}",
        router.id(),
        router.name(),
        router.state(),
        router.zone_id(),
        router.public_ip(),
        router.redundant_state()
    );
}
