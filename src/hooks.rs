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

//! Hooks modifying list requests.
//!
//! A hook can inspect and modify the parameters of a list request before it
//! is sent, e.g. to scope it to a zone or a project. Hooks registered on the
//! [Cloud](../struct.Cloud.html) run first, then the hooks passed to an
//! individual call, each group in registration order.

use std::fmt;
use std::sync::Arc;

use super::operation::OperationSpec;
use super::params::Params;
use super::Result;

type HookFn = dyn Fn(&OperationSpec, &mut Params) -> Result<()> + Send + Sync;

/// A hook applied to list requests.
#[derive(Clone)]
pub struct ListHook {
    name: &'static str,
    inner: Arc<HookFn>,
}

impl ListHook {
    /// Create a hook from a function.
    pub fn new<F>(func: F) -> ListHook
    where
        F: Fn(&OperationSpec, &mut Params) -> Result<()> + Send + Sync + 'static,
    {
        ListHook::named("custom", func)
    }

    fn named<F>(name: &'static str, func: F) -> ListHook
    where
        F: Fn(&OperationSpec, &mut Params) -> Result<()> + Send + Sync + 'static,
    {
        ListHook {
            name,
            inner: Arc::new(func),
        }
    }

    /// Apply the hook to request parameters.
    #[inline]
    pub fn apply(&self, spec: &OperationSpec, params: &mut Params) -> Result<()> {
        (self.inner)(spec, params)
    }
}

impl fmt::Debug for ListHook {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ListHook({})", self.name)
    }
}

/// Concatenate default hooks and call-specific hooks in application order.
pub fn combine(defaults: &[ListHook], overrides: &[ListHook]) -> Vec<ListHook> {
    defaults.iter().chain(overrides.iter()).cloned().collect()
}

/// Apply hooks in order, stopping on the first failure.
pub fn apply_all(hooks: &[ListHook], spec: &OperationSpec, params: &mut Params) -> Result<()> {
    for hook in hooks {
        trace!("Applying {:?} to {}", hook, spec.name);
        hook.apply(spec, params)?;
    }
    Ok(())
}

fn set_if_accepted(name: &'static str, key: &'static str, value: String) -> ListHook {
    ListHook::named(name, move |spec, params| {
        if spec.accepts(key) {
            let _ = params.set(key, value.as_str());
        }
        Ok(())
    })
}

/// Scope requests to a zone (if the operation supports it).
pub fn with_zone<S: Into<String>>(zone_id: S) -> ListHook {
    set_if_accepted("zone", "zoneid", zone_id.into())
}

/// Scope requests to a project (if the operation supports it).
pub fn with_project<S: Into<String>>(project_id: S) -> ListHook {
    set_if_accepted("project", "projectid", project_id.into())
}

/// Scope requests to a domain (if the operation supports it).
pub fn with_domain<S: Into<String>>(domain_id: S) -> ListHook {
    set_if_accepted("domain", "domainid", domain_id.into())
}

/// Scope requests to an account in a domain (if the operation supports it).
pub fn with_account<A, D>(account: A, domain_id: D) -> ListHook
where
    A: Into<String>,
    D: Into<String>,
{
    let account = account.into();
    let domain_id = domain_id.into();
    ListHook::named("account", move |spec, params| {
        if spec.accepts("account") && spec.accepts("domainid") {
            let _ = params
                .set("account", account.as_str())
                .set("domainid", domain_id.as_str());
        }
        Ok(())
    })
}

/// List resources of all accounts the caller has access to.
pub fn with_list_all() -> ListHook {
    ListHook::named("listall", |spec, params| {
        if spec.accepts("listall") {
            let _ = params.set("listall", true);
        }
        Ok(())
    })
}

#[cfg(test)]
pub mod test {
    use std::sync::{Arc, Mutex};

    use super::{apply_all, combine, with_account, with_list_all, with_zone, ListHook};
    use crate::operation::{FieldKind, FieldSpec, OperationSpec, Verb};
    use crate::{Error, ErrorKind, Params};

    static FIELDS: &[FieldSpec] = &[
        FieldSpec::optional("zoneid", FieldKind::Str),
        FieldSpec::optional("listall", FieldKind::Bool),
    ];

    static LIST: OperationSpec = OperationSpec {
        name: "listThings",
        verb: Verb::Read,
        asynchronous: false,
        result_key: None,
        fields: FIELDS,
    };

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> ListHook {
        let log = log.clone();
        ListHook::new(move |_, _| {
            log.lock().unwrap().push(name);
            Ok(())
        })
    }

    #[test]
    fn test_combine_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let defaults = vec![recorder(&log, "d1"), recorder(&log, "d2")];
        let overrides = vec![recorder(&log, "o1")];
        let hooks = combine(&defaults, &overrides);
        assert_eq!(hooks.len(), 3);
        apply_all(&hooks, &LIST, &mut Params::new()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["d1", "d2", "o1"]);
    }

    #[test]
    fn test_later_hook_wins() {
        let hooks = combine(&[with_zone("z1")], &[with_zone("z2")]);
        let mut params = Params::new();
        apply_all(&hooks, &LIST, &mut params).unwrap();
        assert_eq!(params.get_str("zoneid"), Some("z2"));
    }

    #[test]
    fn test_hooks_skip_unsupported() {
        let mut params = Params::new();
        apply_all(
            &[with_account("admin", "d1"), with_list_all()],
            &LIST,
            &mut params,
        )
        .unwrap();
        assert!(!params.contains("account"));
        assert_eq!(params.get_bool("listall"), Some(true));
    }

    #[test]
    fn test_failing_hook_stops() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let failing = ListHook::new(|_, _| Err(Error::new(ErrorKind::InvalidInput, "nope")));
        let hooks = vec![failing, recorder(&log, "after")];
        let err = apply_all(&hooks, &LIST, &mut Params::new()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(log.lock().unwrap().is_empty());
    }
}
