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

//! Listing resources and resolving them by name or ID.
//!
//! Every resolver function returns the server-reported count next to the
//! result. Errors are never retried.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::hooks::{apply_all, combine, ListHook};
use super::operation::OperationSpec;
use super::params::{ParamValue, Params};
use super::session::Session;
use super::{Error, ErrorKind, Result};

/// Page size used when fetching all results.
pub const DEFAULT_PAGE_SIZE: i64 = 500;

/// A resource that can be listed.
pub trait ListResource: Sized {
    /// Protocol structure returned by the list operation.
    type Inner: DeserializeOwned;

    /// The list operation.
    const LIST: &'static OperationSpec;

    /// Key the items are returned under.
    const LIST_KEY: &'static str;

    /// Parameter used to filter by ID.
    const ID_FILTER: &'static str = "id";

    /// Set parameters the list operation cannot work without.
    fn default_params(_params: &mut Params) {}

    /// Wrap a protocol structure.
    fn from_inner(session: &Arc<Session>, inner: Self::Inner) -> Self;

    /// ID of the resource.
    fn resource_id(&self) -> &str;
}

/// A resource that has a name.
pub trait NamedResource: ListResource {
    /// Parameter used to filter by name (`name` or `keyword`).
    const NAME_FILTER: &'static str = "name";

    /// Name of the resource.
    fn resource_name(&self) -> &str;
}

/// Result of a list operation.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    /// Total number of matching items as reported by the server.
    pub count: usize,
    /// Items on this page.
    pub items: Vec<T>,
}

/// A query to a resource list.
pub struct ListQuery<R> {
    session: Arc<Session>,
    params: Params,
    hooks: Vec<ListHook>,
    can_paginate: bool,
    marker: PhantomData<R>,
}

impl<T: DeserializeOwned> Listing<T> {
    /// Parse the unwrapped response of a list operation.
    ///
    /// A missing item key means an empty list.
    pub fn from_value(value: Value, key: &str) -> Result<Listing<T>> {
        let mut map = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::new(
                    ErrorKind::InvalidResponse,
                    format!("Expected an object in a list response, got {}", other),
                ))
            }
        };

        let items: Vec<T> = match map.remove(key) {
            Some(items) => serde_json::from_value(items)?,
            None => Vec::new(),
        };
        let count = match map.get("count") {
            Some(count) => count.as_u64().map(|c| c as usize).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidResponse,
                    format!("Invalid count {} in a list response", count),
                )
            })?,
            None => items.len(),
        };

        Ok(Listing { count, items })
    }
}

impl<T> Listing<T> {
    /// Convert items keeping the count.
    pub fn map<U, F: FnMut(T) -> U>(self, func: F) -> Listing<U> {
        Listing {
            count: self.count,
            items: self.items.into_iter().map(func).collect(),
        }
    }
}

impl<R: ListResource> ListQuery<R> {
    pub(crate) fn new(session: Arc<Session>) -> ListQuery<R> {
        let mut params = Params::new();
        R::default_params(&mut params);
        ListQuery {
            session,
            params,
            hooks: Vec::new(),
            can_paginate: true,
            marker: PhantomData,
        }
    }

    /// Add a filter parameter.
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let _ = self.params.set(key, value);
        self
    }

    /// Add a hook applied after the default hooks.
    pub fn with_hook(mut self, hook: ListHook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Add several hooks applied after the default hooks.
    pub fn with_hooks(mut self, hooks: &[ListHook]) -> Self {
        self.hooks.extend(hooks.iter().cloned());
        self
    }

    /// Request a specific page.
    ///
    /// Using this disables automatic pagination.
    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.can_paginate = false;
        let _ = self.params.set("page", page).set("pagesize", page_size);
        self
    }

    /// Parameters the query will be sent with (before hooks are applied).
    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Execute the query once, returning the server count and one page.
    pub fn fetch(&self) -> Result<Listing<R>> {
        self.fetch_page(None)
    }

    fn fetch_page(&self, page: Option<i64>) -> Result<Listing<R>> {
        let mut params = self.params.clone();
        let hooks = combine(self.session.default_hooks(), &self.hooks);
        apply_all(&hooks, R::LIST, &mut params)?;
        if let Some(page) = page {
            let _ = params
                .set("page", page)
                .set("pagesize", DEFAULT_PAGE_SIZE);
        }

        let value = self.session.request_json(R::LIST, &params)?;
        let listing = Listing::<R::Inner>::from_value(value, R::LIST_KEY)?;
        trace!(
            "{} returned {} of {} items",
            R::LIST.name,
            listing.items.len(),
            listing.count
        );
        let session = &self.session;
        Ok(listing.map(|inner| R::from_inner(session, inner)))
    }

    /// Execute the query and return all results, following pages.
    pub fn all(self) -> Result<Vec<R>> {
        debug!("Fetching all items with {}", R::LIST.name);
        if !self.can_paginate || !R::LIST.accepts("pagesize") {
            return Ok(self.fetch()?.items);
        }

        let mut result = Vec::new();
        let mut page = 1;
        loop {
            let listing = self.fetch_page(Some(page))?;
            let received = listing.items.len();
            result.extend(listing.items);
            if received == 0
                || (received as i64) < DEFAULT_PAGE_SIZE
                || result.len() >= listing.count
            {
                break;
            }
            page += 1;
        }
        Ok(result)
    }

    /// Return one and exactly one result.
    ///
    /// Fails with `ResourceNotFound` if the query produces no results and
    /// with `TooManyItems` if the query produces more than one result.
    pub fn one(self) -> Result<R> {
        debug!("Fetching one item with {}", R::LIST.name);
        let mut listing = self.fetch()?;
        match listing.items.len() {
            0 => Err(Error::new(
                ErrorKind::ResourceNotFound,
                format!("Query to {} returned no results", R::LIST.name),
            )),
            1 => Ok(listing.items.remove(0)),
            n => Err(Error::new(
                ErrorKind::TooManyItems,
                format!("Query to {} returned {} results, expected one", R::LIST.name, n),
            )),
        }
    }
}

impl<R> fmt::Debug for ListQuery<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ListQuery")
            .field("params", &self.params)
            .field("hooks", &self.hooks)
            .field("can_paginate", &self.can_paginate)
            .finish()
    }
}

impl<R> Clone for ListQuery<R> {
    fn clone(&self) -> ListQuery<R> {
        ListQuery {
            session: self.session.clone(),
            params: self.params.clone(),
            hooks: self.hooks.clone(),
            can_paginate: self.can_paginate,
            marker: PhantomData,
        }
    }
}

fn no_match(query: &str, count: usize) -> Error {
    Error::new(
        ErrorKind::ResourceNotFound,
        format!("No match found for {}: count {}", query, count),
    )
}

/// Whether the error means that the ID does not exist.
///
/// The server rejects unknown or malformed IDs with a parameter error
/// (code 431) that names the value. Other parameter errors are not
/// treated as a missing resource.
fn is_invalid_id_error(err: &Error, id: &str) -> bool {
    err.kind() == ErrorKind::InvalidInput
        && err.error_code() == Some(431)
        && err
            .api_details()
            .map(|details| details.errortext.contains(id))
            .unwrap_or(false)
}

/// Resolve a name to the ID of exactly one resource.
///
/// With several matches, the one with exactly the same name wins.
pub fn resolve_id<R: NamedResource>(
    session: &Arc<Session>,
    name: &str,
    hooks: &[ListHook],
) -> Result<(String, usize)> {
    debug!("Resolving ID of {} {}", R::LIST_KEY, name);
    let mut listing = ListQuery::<R>::new(session.clone())
        .with(R::NAME_FILTER, name)
        .with_hooks(hooks)
        .fetch()?;

    match listing.items.len() {
        0 => Err(no_match(name, listing.count)),
        1 => {
            let item = listing.items.remove(0);
            Ok((item.resource_id().to_string(), 1))
        }
        _ => match listing.items.iter().find(|item| item.resource_name() == name) {
            Some(item) => Ok((item.resource_id().to_string(), listing.count)),
            None => Err(Error::new(
                ErrorKind::NoExactMatch,
                format!(
                    "Could not find an exact match for {}: count {}",
                    name, listing.count
                ),
            )),
        },
    }
}

/// Find exactly one resource by its ID.
///
/// An ID rejected by the server as invalid is reported as no match.
pub fn resolve_by_id<R: ListResource>(
    session: &Arc<Session>,
    id: &str,
    hooks: &[ListHook],
) -> Result<(R, usize)> {
    if id.is_empty() {
        return Err(Error::new(ErrorKind::InvalidInput, "ID must not be empty"));
    }

    debug!("Fetching {} with ID {}", R::LIST_KEY, id);
    let result = ListQuery::<R>::new(session.clone())
        .with(R::ID_FILTER, id)
        .with_hooks(hooks)
        .fetch();
    let mut listing = match result {
        Ok(listing) => listing,
        Err(err) if is_invalid_id_error(&err, id) => {
            debug!("{} rejected ID {}: {}", R::LIST.name, id, err);
            return Err(no_match(id, 0));
        }
        Err(err) => return Err(err),
    };

    match listing.items.len() {
        0 => Err(no_match(id, listing.count)),
        1 => Ok((listing.items.remove(0), listing.count)),
        n => Err(Error::new(
            ErrorKind::TooManyItems,
            format!(
                "There is more than one result for {} ID {}: count {}",
                R::LIST_KEY,
                id,
                n
            ),
        )),
    }
}

/// Find exactly one resource by its name.
pub fn resolve_by_name<R: NamedResource>(
    session: &Arc<Session>,
    name: &str,
    hooks: &[ListHook],
) -> Result<(R, usize)> {
    let (id, _) = resolve_id::<R>(session, name, hooks)?;
    resolve_by_id::<R>(session, &id, hooks)
}
