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

//! Apache CloudStack client in Rust.
//!
//! The goal of this project is to provide a simple API for working with
//! CloudStack clouds.
//!
//! Every API command is described by an [`OperationSpec`]. Requests are
//! signed with the account's API and secret keys, read-only commands are sent
//! as `GET` and everything else as `POST`. Asynchronous commands are followed
//! until their job finishes, fails or the configured timeout passes; in the
//! latter case the error carries the partial response and
//! [`Error::is_async_timeout`] returns `true`.
//!
//! # Usage
//!
//! Start with creating a [`Cloud`] object:
//!
//! ```rust,no_run
//! let cs = cloudstack::Cloud::from_env().expect("Unable to create a cloud");
//! ```
//!
//! Then find the resources you need:
//!
//! ```rust,no_run
//! # let cs = cloudstack::Cloud::from_env().expect("Unable to create a cloud");
//! let router = cs.get_router("r-12-VM").expect("Unable to get a router");
//! println!("Router {} is {}", router.name(), router.state());
//! ```
//!
//! # Services
//!
//! * [Roles](role/index.html)
//! * [Virtual routers](router/index.html)
//! * [NICs](nic/index.html)
//! * [Hypervisors](hypervisor/index.html)
//! * [Internal load balancer elements](internal_lb/index.html)
//! * [Backup and recovery](backup/index.html)
//! * [Virtual network functions](vnf/index.html)

#![crate_name = "cloudstack"]
#![crate_type = "lib"]
// NOTE: we do not use generic deny(warnings) to avoid breakages with new
// versions of the compiler. Add more warnings here as you discover them.
// Taken from https://github.com/rust-unofficial/patterns/
#![deny(
    missing_debug_implementations,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_import_braces,
    unused_parens,
    while_true
)]
#![warn(missing_docs, unused_extern_crates, unused_results)]
#![allow(clippy::new_ret_no_self)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod utils;

mod cloud;
mod common;
mod config;
mod error;
mod hooks;
mod job;
mod operation;
mod params;
mod resource;
mod session;
mod signature;
mod waiter;

pub mod backup;
pub mod hypervisor;
pub mod internal_lb;
pub mod nic;
pub mod role;
pub mod router;
pub mod vnf;

pub use crate::cloud::Cloud;
pub use crate::common::Refresh;
pub use crate::config::Config;
pub use crate::error::{ApiErrorDetails, Error, ErrorKind, Result};
pub use crate::hooks::{
    apply_all, combine, with_account, with_domain, with_list_all, with_project, with_zone,
    ListHook,
};
pub use crate::job::{
    dispatch, execute, query_async_job_result, unwrap_job_result, AsyncJob, JobHandle,
    JobOutcome, JobStatus, JobWaiter, QUERY_ASYNC_JOB_RESULT,
};
pub use crate::operation::{FieldKind, FieldSpec, MapStyle, OperationSpec, Verb};
pub use crate::params::{ParamValue, Params};
pub use crate::resource::{
    resolve_by_id, resolve_by_name, resolve_id, ListQuery, ListResource, Listing,
    NamedResource, DEFAULT_PAGE_SIZE,
};
pub use crate::session::{HttpRequest, HttpResponse, HttpTransport, Session, Transport};
pub use crate::utils::is_id;
pub use crate::waiter::{Waiter, WaiterCurrentState};
