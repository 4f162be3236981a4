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

//! Sign and send a PUT to S3 using credentials from the environment.
//!
//! ```shell
//! AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... AWS_REGION=us-east-2 \
//!     cargo run --example put_object -- https://<bucket>.s3.us-east-2.amazonaws.com/hello.txt
//! ```

use std::sync::Arc;

use anyhow::{Context as _, Result};
use bytes::Bytes;
use tinysig_aws_v4::{Config, DefaultCredentialProvider, RequestSigner};
use tinysig_core::{Context, OsEnv, Signer};
use tinysig_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let url = std::env::args()
        .nth(1)
        .context("usage: put_object <url>")?;

    let ctx = Context::new()
        .with_env(OsEnv)
        .with_http_send(ReqwestHttpSend::default());

    let config = Config::default().from_env(&ctx);
    let builder = RequestSigner::from_config("s3", &config)?;
    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::with_config(Arc::new(config)),
        builder,
    );

    let req = http::Request::put(url).body(Bytes::from_static(b"your ad could be here"))?;
    let resp = signer.send(req).await?;

    println!("status: {}", resp.status());
    println!("body: {}", String::from_utf8_lossy(resp.body()));
    Ok(())
}
