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

//! Operation parameters and their wire encoding.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};

use super::operation::{FieldKind, MapStyle, OperationSpec};

/// A value of a single operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// A boolean, sent as `true` or `false`.
    Bool(bool),
    /// A list of strings, sent comma-separated.
    StrList(Vec<String>),
    /// A string mapping, sent as indexed entries in key order.
    StrMap(BTreeMap<String, String>),
}

/// A set of operation parameters.
///
/// Only parameters that were explicitly set are ever sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl ParamValue {
    /// Kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            ParamValue::Str(..) => FieldKind::Str,
            ParamValue::Int(..) => FieldKind::Int,
            ParamValue::Bool(..) => FieldKind::Bool,
            ParamValue::StrList(..) => FieldKind::StrList,
            ParamValue::StrMap(..) => FieldKind::Map(MapStyle::KeyValue),
        }
    }

    /// Get the string value (if it is a string).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer value (if it is an integer).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the boolean value (if it is a boolean).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the list value (if it is a list).
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::StrList(l) => Some(l),
            _ => None,
        }
    }

    /// Get the mapping value (if it is a mapping).
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ParamValue::StrMap(m) => Some(m),
            _ => None,
        }
    }

    fn encode_into(&self, key: &str, style: MapStyle, out: &mut Vec<(String, String)>) {
        match self {
            ParamValue::Str(s) => out.push((key.to_string(), s.clone())),
            ParamValue::Int(i) => out.push((key.to_string(), i.to_string())),
            ParamValue::Bool(b) => out.push((key.to_string(), b.to_string())),
            ParamValue::StrList(l) => out.push((key.to_string(), l.join(","))),
            // BTreeMap iterates in ascending key order, which keeps
            // signatures stable regardless of insertion order.
            ParamValue::StrMap(m) => {
                for (idx, (k, v)) in m.iter().enumerate() {
                    match style {
                        MapStyle::KeyValue => {
                            out.push((format!("{}[{}].key", key, idx), k.clone()));
                            out.push((format!("{}[{}].value", key, idx), v.clone()));
                        }
                        MapStyle::Inline => {
                            out.push((format!("{}[{}].{}", key, idx, k), v.clone()));
                        }
                    }
                }
            }
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> ParamValue {
        ParamValue::Str(value)
    }
}

impl<'s> From<&'s str> for ParamValue {
    fn from(value: &'s str) -> ParamValue {
        ParamValue::Str(value.to_string())
    }
}

impl<'s> From<&'s String> for ParamValue {
    fn from(value: &'s String) -> ParamValue {
        ParamValue::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> ParamValue {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> ParamValue {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> ParamValue {
        ParamValue::Int(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> ParamValue {
        ParamValue::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> ParamValue {
        ParamValue::StrList(value)
    }
}

impl<'s> From<Vec<&'s str>> for ParamValue {
    fn from(value: Vec<&'s str>) -> ParamValue {
        ParamValue::StrList(value.into_iter().map(String::from).collect())
    }
}

impl From<BTreeMap<String, String>> for ParamValue {
    fn from(value: BTreeMap<String, String>) -> ParamValue {
        ParamValue::StrMap(value)
    }
}

impl From<HashMap<String, String>> for ParamValue {
    fn from(value: HashMap<String, String>) -> ParamValue {
        ParamValue::StrMap(value.into_iter().collect())
    }
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Params {
        Params(BTreeMap::new())
    }

    /// Set a parameter, replacing the previous value.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut Params
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let _ = self.0.insert(key.into(), value.into());
        self
    }

    /// Set a parameter and return the modified set.
    pub fn with<K, V>(mut self, key: K, value: V) -> Params
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let _ = self.set(key, value);
        self
    }

    /// Set a parameter only if it is not already set.
    pub fn set_default<K, V>(&mut self, key: K, value: V) -> &mut Params
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let _ = self.0.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Add a single entry to a mapping parameter, creating it if needed.
    ///
    /// Replaces the parameter if it is not a mapping.
    pub fn insert_entry<K, MK, MV>(&mut self, key: K, entry_key: MK, entry_value: MV) -> &mut Params
    where
        K: Into<String>,
        MK: Into<String>,
        MV: Into<String>,
    {
        let value = self
            .0
            .entry(key.into())
            .or_insert_with(|| ParamValue::StrMap(BTreeMap::new()));
        if let ParamValue::StrMap(ref mut map) = value {
            let _ = map.insert(entry_key.into(), entry_value.into());
        } else {
            let mut map = BTreeMap::new();
            let _ = map.insert(entry_key.into(), entry_value.into());
            *value = ParamValue::StrMap(map);
        }
        self
    }

    /// Remove a parameter, returning its value.
    pub fn reset<K: AsRef<str>>(&mut self, key: K) -> Option<ParamValue> {
        self.0.remove(key.as_ref())
    }

    /// Get a parameter.
    #[inline]
    pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&ParamValue> {
        self.0.get(key.as_ref())
    }

    /// Get a string parameter.
    pub fn get_str<K: AsRef<str>>(&self, key: K) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    /// Get an integer parameter.
    pub fn get_i64<K: AsRef<str>>(&self, key: K) -> Option<i64> {
        self.get(key).and_then(ParamValue::as_i64)
    }

    /// Get a boolean parameter.
    pub fn get_bool<K: AsRef<str>>(&self, key: K) -> Option<bool> {
        self.get(key).and_then(ParamValue::as_bool)
    }

    /// Whether a parameter is set.
    #[inline]
    pub fn contains<K: AsRef<str>>(&self, key: K) -> bool {
        self.0.contains_key(key.as_ref())
    }

    /// Number of parameters set.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }

    /// Encode parameters into form key/value pairs.
    ///
    /// Mapping parameters use the style declared by the operation schema,
    /// `MapStyle::KeyValue` for parameters the schema does not know.
    pub fn encode(&self, spec: &OperationSpec) -> Vec<(String, String)> {
        let mut result = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            let style = match spec.field(key).map(|f| f.kind) {
                Some(FieldKind::Map(style)) => style,
                _ => MapStyle::KeyValue,
            };
            value.encode_into(key, style, &mut result);
        }
        result
    }
}

impl<'p> IntoIterator for &'p Params {
    type Item = (&'p String, &'p ParamValue);
    type IntoIter = btree_map::Iter<'p, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
