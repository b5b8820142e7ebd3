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

//! Virtual network functions API implementation bits.

mod api;
mod appliances;
mod protocol;

pub use self::api::{DEPLOY_VNF_APPLIANCE, LIST_VNF_APPLIANCES, LIST_VNF_TEMPLATES};
pub use self::appliances::{
    NewVnfAppliance, VnfAppliance, VnfApplianceQuery, VnfTemplate, VnfTemplateQuery,
};
pub use self::protocol::{ApplianceNic, TemplateFilter, VirtualMachineState, VnfNic};
