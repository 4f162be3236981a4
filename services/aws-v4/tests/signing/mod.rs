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

//! Live tests against a real S3 compatible endpoint.
//!
//! Only run when `TINYSIG_AWS_V4_TEST=on`, see `.env.example`.

mod standard;

use std::env;

use anyhow::Result;
use bytes::Bytes;
use http::{Request, StatusCode};
use log::debug;
use tinysig_aws_v4::{Config, Credential, RequestSigner, StaticCredentialProvider};
use tinysig_core::{Context, Signer};
use tinysig_http_send_reqwest::ReqwestHttpSend;

/// Load static credential from environment variables
pub fn load_static_credential() -> Credential {
    let access_key =
        env::var("TINYSIG_AWS_V4_ACCESS_KEY").expect("TINYSIG_AWS_V4_ACCESS_KEY must be set");
    let secret_key =
        env::var("TINYSIG_AWS_V4_SECRET_KEY").expect("TINYSIG_AWS_V4_SECRET_KEY must be set");

    let cred = Credential::new(access_key, secret_key);
    match env::var("TINYSIG_AWS_V4_SESSION_TOKEN") {
        Ok(token) => cred.with_session_token(token),
        Err(_) => cred,
    }
}

/// Initialize test environment
pub fn init_signing_test() -> Option<(Signer<Credential>, String)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("TINYSIG_AWS_V4_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let config = Config {
        region: Some(env::var("TINYSIG_AWS_V4_REGION").expect("TINYSIG_AWS_V4_REGION must be set")),
        ..Default::default()
    };
    let service = env::var("TINYSIG_AWS_V4_SERVICE").unwrap_or_else(|_| "s3".to_string());
    let url = env::var("TINYSIG_AWS_V4_URL").expect("TINYSIG_AWS_V4_URL must be set");

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::from(load_static_credential()),
        RequestSigner::from_config(&service, &config).expect("config must be valid"),
    );

    Some((signer, url))
}

/// Send signed request and return response
pub async fn send_signed_request(
    signer: &Signer<Credential>,
    req: Request<Bytes>,
) -> Result<(StatusCode, String)> {
    let resp = signer.send(req).await?;

    let status = resp.status();
    let body = String::from_utf8_lossy(resp.body()).to_string();

    debug!("response status: {status}, body: {body}");
    Ok((status, body))
}
