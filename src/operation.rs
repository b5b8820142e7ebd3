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

//! Declarative descriptions of API operations.
//!
//! Every CloudStack command is described by an `OperationSpec`: its name,
//! whether it changes anything on the server, whether it is asynchronous,
//! the key its result is nested under and the parameters it accepts. A single
//! generic code path uses these descriptions to validate, encode, send and
//! decode calls.

use reqwest::Method;

use super::params::{ParamValue, Params};
use super::{Error, ErrorKind, Result};

/// Whether an operation only reads or also modifies state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Read-only operation, sent as `GET`.
    Read,
    /// Mutating operation, sent as `POST`.
    Mutate,
}

/// How a mapping parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStyle {
    /// `name[0].key=k&name[0].value=v`.
    KeyValue,
    /// `name[0].k=v`.
    Inline,
}

/// Expected kind of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string.
    Str,
    /// An integer.
    Int,
    /// A boolean.
    Bool,
    /// A comma-separated list of strings.
    StrList,
    /// A mapping of strings.
    Map(MapStyle),
}

/// Description of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Parameter name.
    pub name: &'static str,
    /// Expected value kind.
    pub kind: FieldKind,
    /// Whether the parameter must be provided.
    pub required: bool,
}

/// Description of an API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    /// Command name, e.g. `listRoles`.
    pub name: &'static str,
    /// Whether the command modifies state.
    pub verb: Verb,
    /// Whether the command returns a job ID instead of a result.
    pub asynchronous: bool,
    /// Key the result object is nested under, e.g. `role`.
    pub result_key: Option<&'static str>,
    /// Accepted parameters.
    pub fields: &'static [FieldSpec],
}

impl Verb {
    /// HTTP method used for this verb.
    pub fn method(self) -> Method {
        match self {
            Verb::Read => Method::GET,
            Verb::Mutate => Method::POST,
        }
    }
}

impl FieldKind {
    fn matches(self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Str, ParamValue::Str(..))
                | (FieldKind::Int, ParamValue::Int(..))
                | (FieldKind::Bool, ParamValue::Bool(..))
                | (FieldKind::StrList, ParamValue::StrList(..))
                | (FieldKind::Map(..), ParamValue::StrMap(..))
        )
    }
}

impl FieldSpec {
    /// A required parameter.
    pub const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
        FieldSpec {
            name,
            kind,
            required: true,
        }
    }

    /// An optional parameter.
    pub const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
        FieldSpec {
            name,
            kind,
            required: false,
        }
    }
}

impl OperationSpec {
    /// Find a parameter description.
    pub fn field<S: AsRef<str>>(&self, name: S) -> Option<&'static FieldSpec> {
        let name = name.as_ref();
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the operation accepts the parameter.
    #[inline]
    pub fn accepts<S: AsRef<str>>(&self, name: S) -> bool {
        self.field(name).is_some()
    }

    /// Whether the operation is read-only.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.verb == Verb::Read
    }

    /// Check parameters against the schema.
    ///
    /// Fails with `InvalidInput` on missing required parameters, unknown
    /// parameters and values of the wrong kind.
    pub fn validate(&self, params: &Params) -> Result<()> {
        if let Some(missing) = self
            .fields
            .iter()
            .find(|f| f.required && !params.contains(f.name))
        {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("{} requires parameter {}", self.name, missing.name),
            ));
        }

        for (key, value) in params {
            match self.field(key) {
                Some(field) if field.kind.matches(value) => {}
                Some(field) => {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        format!(
                            "Parameter {} of {} must be {:?}, got {:?}",
                            key,
                            self.name,
                            field.kind,
                            value.kind()
                        ),
                    ));
                }
                None => {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        format!("{} does not accept parameter {}", self.name, key),
                    ));
                }
            }
        }

        Ok(())
    }
}
