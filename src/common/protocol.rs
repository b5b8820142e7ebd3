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

//! Common protocol bits.

#![allow(missing_docs)]

use chrono::{DateTime, FixedOffset};
use serde::de::Error as DeserError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::super::{Error, ErrorKind, Result};

/// Date format used by the API, e.g. `2024-01-15T10:20:30+0000`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Response of operations that only report success.
#[derive(Clone, Debug, Deserialize)]
pub struct SuccessResponse {
    #[serde(deserialize_with = "deser_bool")]
    pub success: bool,
    #[serde(default)]
    pub displaytext: Option<String>,
}

impl SuccessResponse {
    /// Convert into an error if the operation reported a failure.
    pub fn into_result(self, operation: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::OperationFailed,
                format!(
                    "{} reported a failure: {}",
                    operation,
                    self.displaytext.as_deref().unwrap_or("no details provided")
                ),
            ))
        }
    }
}

/// Parse a date in the API format.
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

/// Deserialize an optional date, treating an empty string as no date.
pub fn deser_optional_date<'de, D>(
    des: D,
) -> ::std::result::Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Deserialize::deserialize(des)?;
    match value {
        Some(ref s) if s.is_empty() => Ok(None),
        Some(s) => parse_date(&s)
            .map(Some)
            .ok_or_else(|| DeserError::custom(format!("invalid date {}", s))),
        None => Ok(None),
    }
}

/// Deserialize an optional string, treating an empty string as missing.
pub fn empty_as_none<'de, D>(des: D) -> ::std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Deserialize::deserialize(des)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Deserialize a boolean sent either as a JSON boolean or as a string.
pub fn deser_bool<'de, D>(des: D) -> ::std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(des)? {
        Value::Bool(b) => Ok(b),
        Value::String(ref s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(ref s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(DeserError::custom(format!(
            "expected a boolean, got {}",
            other
        ))),
    }
}

/// Deserialize an optional boolean sent either as a JSON boolean or as a string.
pub fn deser_optional_bool<'de, D>(des: D) -> ::std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(des)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(ref s)) if s.is_empty() => Ok(None),
        Some(Value::String(ref s)) => match s.to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(DeserError::custom(format!("expected a boolean, got {}", s))),
        },
        Some(other) => Err(DeserError::custom(format!(
            "expected a boolean, got {}",
            other
        ))),
    }
}
