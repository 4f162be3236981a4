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

use std::fmt::{Debug, Formatter};

use tinysig_core::hash::{hex_hmac_sha256, hmac_sha256};
use tinysig_core::time::{format_date, DateTime};

use crate::constants::AWS4_REQUEST;

/// Credential scope: `20220313/<region>/<service>/aws4_request`
pub fn credential_scope(time: DateTime, region: &str, service: &str) -> String {
    format!("{}/{region}/{service}/{AWS4_REQUEST}", format_date(time))
}

/// Every intermediate key of the derivation chain.
///
/// Each step narrows the scope by exactly one dimension.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKeys {
    /// `HMAC("AWS4" + secret, date)`
    pub k_date: [u8; 32],
    /// `HMAC(k_date, region)`
    pub k_region: [u8; 32],
    /// `HMAC(k_region, service)`
    pub k_service: [u8; 32],
    /// `HMAC(k_service, "aws4_request")`
    pub k_signing: [u8; 32],
}

impl Debug for DerivedKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKeys { .. }")
    }
}

/// SigningKey is valid for exactly one (date, region, service) triple.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Derive the signing key for `secret` scoped to the date of `time`,
    /// `region` and `service`.
    pub fn derive(secret: &str, time: DateTime, region: &str, service: &str) -> Self {
        Self(Self::derive_steps(secret, time, region, service).k_signing)
    }

    /// Run the derivation chain and keep every intermediate key.
    ///
    /// Raw digests are chained, nothing is hex encoded in between.
    pub fn derive_steps(secret: &str, time: DateTime, region: &str, service: &str) -> DerivedKeys {
        let secret = format!("AWS4{secret}");
        let k_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
        let k_region = hmac_sha256(&k_date, region.as_bytes());
        let k_service = hmac_sha256(&k_region, service.as_bytes());
        let k_signing = hmac_sha256(&k_service, AWS4_REQUEST.as_bytes());

        DerivedKeys {
            k_date,
            k_region,
            k_service,
            k_signing,
        }
    }

    /// Sign the string to sign, returning the lowercase hex signature.
    pub fn sign(&self, string_to_sign: &str) -> String {
        hex_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }

    /// Raw bytes of the key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn time(y: i32, m: u32, d: u32) -> DateTime {
        Utc.with_ymd_and_hms(y, m, d, 12, 36, 0).unwrap()
    }

    #[test]
    fn test_derive_signing_key_example() {
        // Key derivation example from the AWS IAM documentation.
        let key = SigningKey::derive(SECRET, time(2012, 2, 15), "us-east-1", "iam");
        assert_eq!(
            hex::encode(key.as_bytes()),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_k_date_only_depends_on_date() {
        let keys = SigningKey::derive_steps(SECRET, time(2015, 8, 30), "us-east-1", "service");
        assert_eq!(
            hex::encode(keys.k_date),
            "0138c7a6cbd60aa727b2f653a522567439dfb9f3e72b21f9b25941a42f04a7cd"
        );
        assert_eq!(keys.k_signing, SigningKey::derive(SECRET, time(2015, 8, 30), "us-east-1", "service").0);
    }

    #[test]
    fn test_derive_steps_region_narrows_scope() {
        let east1 = SigningKey::derive_steps(SECRET, time(2015, 8, 30), "us-east-1", "s3");
        let east2 = SigningKey::derive_steps(SECRET, time(2015, 8, 30), "us-east-2", "s3");

        assert_eq!(east1.k_date, east2.k_date);
        assert_ne!(east1.k_region, east2.k_region);
        assert_ne!(east1.k_service, east2.k_service);
        assert_ne!(east1.k_signing, east2.k_signing);

        // Same region, other service: only the last two steps differ.
        let iam = SigningKey::derive_steps(SECRET, time(2015, 8, 30), "us-east-1", "iam");
        assert_eq!(east1.k_date, iam.k_date);
        assert_eq!(east1.k_region, iam.k_region);
        assert_ne!(east1.k_service, iam.k_service);
        assert_ne!(east1.k_signing, iam.k_signing);
    }

    #[test]
    fn test_credential_scope() {
        assert_eq!(
            credential_scope(time(2015, 8, 30), "us-east-2", "s3"),
            "20150830/us-east-2/s3/aws4_request"
        );
    }

    #[test]
    fn test_signing_key_debug_hides_bytes() {
        let key = SigningKey::derive(SECRET, time(2015, 8, 30), "us-east-1", "s3");
        assert_eq!(format!("{key:?}"), "SigningKey { .. }");
    }
}
