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

//! Various utilities.

use uuid::Uuid;

/// Expose a field of the inner protocol structure as a getter.
macro_rules! transparent_property {
    ($(#[$attr:meta])* $name:ident: ref $type:ty) => (
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> &$type {
            &self.inner.$name
        }
    );

    ($(#[$attr:meta])* $name:ident: $type:ty) => (
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> $type {
            self.inner.$name
        }
    );
}

/// Generate a pair of builder methods setting a request parameter.
macro_rules! request_param {
    ($(#[$attr:meta])* $set_func:ident, $with_func:ident -> $param:expr, $type:ty) => (
        $(#[$attr])*
        pub fn $set_func<T: Into<$type>>(&mut self, value: T) {
            let value: $type = value.into();
            let _ = self.params.set($param, value);
        }

        $(#[$attr])*
        #[inline]
        pub fn $with_func<T: Into<$type>>(mut self, value: T) -> Self {
            self.$set_func(value);
            self
        }
    );
}

/// Define an enumeration sent and received as a string.
macro_rules! protocol_enum {
    {$(#[$attr:meta])* enum $name:ident {
        $($(#[$iattr:meta])* $item:ident = $val:literal),+
    }} => (
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$iattr])* $item),+
        }

        impl $name {
            /// String representation used by the API.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$item => $val),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(value: &str) -> $crate::Result<$name> {
                match value {
                    $($val => Ok($name::$item),)+
                    other => Err($crate::Error::new(
                        $crate::ErrorKind::InvalidResponse,
                        format!("Unknown {} value {}", stringify!($name), other),
                    )),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(des: D) -> ::std::result::Result<$name, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <String as ::serde::Deserialize>::deserialize(des)?;
                value.parse::<$name>().map_err(::serde::de::Error::custom)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, ser: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                ser.serialize_str(self.as_str())
            }
        }

        impl From<$name> for $crate::ParamValue {
            fn from(value: $name) -> $crate::ParamValue {
                $crate::ParamValue::Str(value.as_str().to_string())
            }
        }
    );
}

/// Whether the value looks like a resource ID rather than a name.
///
/// Resources are identified by UUIDs, some older ones by numbers.
pub fn is_id<S: AsRef<str>>(value: S) -> bool {
    let value = value.as_ref();
    Uuid::parse_str(value).is_ok()
        || (!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
}
