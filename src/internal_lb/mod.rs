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

//! Internal load balancer elements API implementation bits.

mod api;
mod elements;
mod protocol;

pub use self::api::{
    CONFIGURE_INTERNAL_LB_ELEMENT, CREATE_INTERNAL_LB_ELEMENT, LIST_INTERNAL_LB_ELEMENTS,
};
pub use self::elements::{InternalLbElement, InternalLbElementQuery};
