// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Canonical request of AWS SigV4.
//!
//! - [Create a canonical request](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html#create-canonical-request)

use std::fmt::Write;

use http::header::HOST;
use percent_encoding::utf8_percent_encode;
use tinysig_core::hash::hex_sha256;
use tinysig_core::{Result, SigningRequest};

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};

/// CanonicalRequest renders a [`SigningRequest`] into the text that gets hashed
/// into the string to sign.
///
/// Every part is a pure function of the request and the payload hash, and
/// nothing depends on the order in which headers or query pairs were added.
#[derive(Debug)]
pub struct CanonicalRequest<'a> {
    req: &'a SigningRequest,
    payload_hash: String,
}

impl<'a> CanonicalRequest<'a> {
    /// Create a canonical request for `req` carrying `body` as payload.
    pub fn new(req: &'a SigningRequest, body: &[u8]) -> Self {
        Self {
            req,
            payload_hash: hex_sha256(body),
        }
    }

    /// Create a canonical request with an already computed payload hash.
    pub fn with_payload_hash(req: &'a SigningRequest, payload_hash: impl Into<String>) -> Self {
        Self {
            req,
            payload_hash: payload_hash.into(),
        }
    }

    /// The HTTP method, unmodified.
    pub fn canonical_method(&self) -> &str {
        self.req.method.as_str()
    }

    /// The URI path, percent encoded once with the SigV4 URI set.
    ///
    /// Already normalized paths come out unchanged. Empty paths become `/`.
    /// Paths that don't decode to UTF-8 are used as they appear in the URI.
    pub fn canonical_uri(&self) -> String {
        if self.req.path.is_empty() {
            return "/".to_string();
        }

        match self.req.path_percent_decoded() {
            Some(path) => utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string(),
            None => self.req.path.clone(),
        }
    }

    /// The query string: encoded pairs ordered by name then value and
    /// joined with `&`. Empty values keep their `=`.
    pub fn canonical_query_string(&self) -> String {
        let mut query = self
            .req
            .query
            .iter()
            .map(|(k, v)| {
                (
                    utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                    utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
                )
            })
            .collect::<Vec<_>>();
        query.sort_unstable();

        query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// One `name:value` line per header, ordered by name.
    ///
    /// Values are trimmed with inner whitespace collapsed. Multiple values
    /// of the same header are sorted and joined by `,`. `host` falls back to
    /// the request authority when the header is absent.
    pub fn canonical_headers(&self) -> Result<String> {
        let mut f = String::with_capacity(128);
        for (idx, name) in self.header_names().into_iter().enumerate() {
            if idx != 0 {
                f.push('\n');
            }

            let values = if name == HOST && !self.req.headers.contains_key(HOST) {
                vec![self.req.host()]
            } else {
                let mut values = self
                    .req
                    .header_values(name)?
                    .into_iter()
                    .map(normalize_value)
                    .collect::<Vec<_>>();
                values.sort_unstable();
                values
            };
            write!(f, "{}:{}", name, values.join(","))?;
        }

        Ok(f)
    }

    /// Lowercase header names, sorted and joined by `;`.
    pub fn signed_headers(&self) -> String {
        self.header_names().join(";")
    }

    /// Hex encoded SHA256 of the payload.
    pub fn hashed_payload(&self) -> &str {
        &self.payload_hash
    }

    /// Build the full canonical request.
    ///
    /// ```text
    /// <method>
    /// <uri>
    /// <query string>
    /// <headers>
    ///
    /// <signed headers>
    /// <payload hash>
    /// ```
    pub fn canonical_request(&self) -> Result<String> {
        // 256 is specially chosen to avoid reallocation for most requests.
        let mut f = String::with_capacity(256);

        writeln!(f, "{}", self.canonical_method())?;
        writeln!(f, "{}", self.canonical_uri())?;
        writeln!(f, "{}", self.canonical_query_string())?;
        writeln!(f, "{}", self.canonical_headers()?)?;
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers())?;
        write!(f, "{}", self.hashed_payload())?;

        Ok(f)
    }

    fn header_names(&self) -> Vec<&str> {
        let mut names = self.req.header_name_to_vec_sorted();
        if !self.req.headers.contains_key(HOST) {
            names.push("host");
            names.sort_unstable();
        }
        names
    }
}

fn normalize_value(value: &str) -> String {
    value
        .split([' ', '\t'])
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
