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

fn main() {
    env_logger::init();

    let cs = cloudstack::Cloud::from_env()
        .expect("Failed to create a cloud from the environment");

    let roles = cs.list_roles().expect("Cannot list roles");
    println!("Found {} roles", roles.len());
    for role in &roles {
        println!(
            "ID = {}, Name = {}, Type = {}, Public = {:?}, Description = {:?}",
            role.id(),
            role.name(),
            role.role_type(),
            role.is_public(),
            role.description()
        );
    }
}
