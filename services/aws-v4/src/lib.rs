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

//! AWS Signature Version 4 for tinysig.
//!
//! This crate signs [`http`] requests with
//! [AWS SigV4](https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv.html).
//!
//! ## Quick start
//!
//! ```no_run
//! use tinysig_aws_v4::{Credential, RequestSigner};
//!
//! # fn example() -> tinysig_core::Result<()> {
//! let signer = RequestSigner::new("s3", "us-east-1");
//! let cred = Credential::new("access_key_id", "secret_access_key");
//!
//! let body = b"hello, world";
//! let (mut parts, _) = http::Request::put("https://my-bucket.s3.amazonaws.com/hello.txt")
//!     .body(())?
//!     .into_parts();
//!
//! signer.sign(&mut parts, &cred, body)?;
//! assert!(parts.headers.contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```
//!
//! ## Building blocks
//!
//! - [`CanonicalRequest`] renders a request into its canonical text.
//! - [`SigningKey`] derives the scoped key and computes signatures.
//! - [`RequestSigner`] runs the whole process and writes the headers back.
//!
//! Pair [`RequestSigner`] with a credential provider through
//! [`tinysig_core::Signer`] to load credentials lazily and send requests.

mod constants;
pub use constants::{
    AWS_ACCESS_KEY_ID, AWS_DEFAULT_REGION, AWS_REGION, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN,
    X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod canonical;
pub use canonical::CanonicalRequest;

mod signing_key;
pub use signing_key::{credential_scope, DerivedKeys, SigningKey};

mod sign_request;
pub use sign_request::{string_to_sign, RequestSigner};

mod provide_credential;
pub use provide_credential::*;

pub use tinysig_core::hash::EMPTY_STRING_SHA256;
