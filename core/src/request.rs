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

use std::borrow::Cow;

use http::header::HeaderName;
use http::uri::Authority;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

use crate::{Error, Result};

/// Signing context for request.
///
/// Built from `http::request::Parts` before signing and applied back after.
/// The caller's parts stay untouched until [`SigningRequest::apply`], so a
/// failed signing leaves the request as it was. The URI is read but never
/// rewritten.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded as it appears in the URI.
    pub path: String,
    /// HTTP query parameters, percent decoded, in URI order.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    ///
    /// Fails if the URI carries no authority: the `Host` header is always
    /// part of the signed set and is derived from it.
    pub fn build(parts: &http::request::Parts) -> Result<Self> {
        let authority = parts.uri.authority().cloned().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;

        Ok(SigningRequest {
            method: parts.method.clone(),
            authority,
            path: parts.uri.path().to_string(),
            query: parts
                .uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        parts.headers = self.headers;
        Ok(())
    }

    /// Get the path percent decoded.
    ///
    /// Returns `None` if the decoded bytes are not valid UTF-8.
    pub fn path_percent_decoded(&self) -> Option<Cow<'_, str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .ok()
    }

    /// Value for the `Host` header: the authority without any userinfo.
    pub fn host(&self) -> String {
        match self.authority.port() {
            Some(port) => format!("{}:{}", self.authority.host(), port),
            None => self.authority.host().to_string(),
        }
    }

    /// Insert header if it's not present yet.
    pub fn header_insert_if_absent(&mut self, key: HeaderName, value: HeaderValue) {
        if !self.headers.contains_key(&key) {
            self.headers.insert(key, value);
        }
    }

    /// Get header names as sorted vector.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Get all values of a header as `&str`, in insertion order.
    pub fn header_values(&self, key: &str) -> Result<Vec<&str>> {
        let values = self
            .headers
            .get_all(key)
            .iter()
            .map(|v| v.to_str())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(values)
    }
}
