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

//! NIC API implementation bits.

mod api;
mod nics;
mod protocol;

pub(crate) use self::nics::for_virtual_machine;
pub use self::api::{ADD_IP_TO_NIC, LIST_NICS, REMOVE_IP_FROM_NIC};
pub use self::nics::{Nic, NicQuery};
pub use self::protocol::SecondaryIp;
