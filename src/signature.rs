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

//! Request signing.
//!
//! CloudStack authenticates a request by an HMAC-SHA1 signature computed over
//! the lower-cased query string with parameters sorted by name.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

use super::{Error, ErrorKind, Result};

/// Characters left as is: letters, digits and `-_.~`.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escape a query component, encoding spaces as `%20`.
pub(crate) fn escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ESCAPE).to_string()
}

/// Build the query string from pairs sorted by their (unescaped) names.
pub(crate) fn canonical_query(pairs: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .into_iter()
        .map(|(k, v)| format!("{}={}", escape(k), escape(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compute a base64-encoded signature of a canonical query string.
pub(crate) fn sign(query: &str, secret_key: &str) -> Result<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret_key.as_bytes()).map_err(|e| {
        Error::new(
            ErrorKind::InvalidConfig,
            format!("Cannot use the secret key: {}", e),
        )
    })?;
    mac.update(query.to_lowercase().as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
pub mod test {
    use super::{canonical_query, escape, sign};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a b+c"), "a%20b%2Bc");
        assert_eq!(escape("tags[0].key"), "tags%5B0%5D.key");
        assert_eq!(escape("Az09-_.~"), "Az09-_.~");
        assert_eq!(escape("a,b"), "a%2Cb");
    }

    #[test]
    fn test_canonical_query_sorted() {
        let query = canonical_query(&pairs(&[
            ("response", "json"),
            ("command", "listRoles"),
            ("apiKey", "KEY"),
            ("name", "Domain Admin"),
        ]));
        assert_eq!(
            query,
            "apiKey=KEY&command=listRoles&name=Domain%20Admin&response=json"
        );
    }

    #[test]
    fn test_sign_is_deterministic_and_case_insensitive() {
        let first = canonical_query(&pairs(&[("command", "listRoles"), ("apiKey", "Key")]));
        let second = canonical_query(&pairs(&[("apiKey", "Key"), ("command", "listRoles")]));
        let sig1 = sign(&first, "secret").unwrap();
        let sig2 = sign(&second, "secret").unwrap();
        assert_eq!(sig1, sig2);
        assert_eq!(sig1, sign(&first.to_uppercase(), "secret").unwrap());
        // SHA1 is 20 bytes, which is 28 characters of padded base64.
        assert_eq!(sig1.len(), 28);
        assert_ne!(sig1, sign(&first, "other-secret").unwrap());
    }
}
