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

//! Amazon Pay API request signer and client
//!
//! ```no_run
//! use paysign_amazon_pay::{ApiRequest, Client, Config};
//! use paysign_core::{Context, OsEnv};
//! use paysign_file_read_tokio::TokioFileRead;
//! use paysign_http_send_reqwest::ReqwestHttpSend;
//! use serde_json::json;
//!
//! # async fn example() -> paysign_core::Result<()> {
//! let ctx = Context::new()
//!     .with_file_read(TokioFileRead)
//!     .with_env(OsEnv);
//! let credential = Config {
//!     private_key_path: Some("~/.amazon-pay/private.pem".to_string()),
//!     ..Default::default()
//! }
//! .from_env(&ctx)
//! .into_credential(&ctx)
//! .await?;
//!
//! let http = ReqwestHttpSend::with_tls_verification(credential.endpoint().tls_verification())?;
//! let client = Client::new(ctx.with_http_send(http), credential);
//!
//! let resp = client
//!     .api_call(
//!         ApiRequest::post("checkoutSessions")
//!             .with_json(&json!({"storeId": "amzn1.application-oa2-client.xxx"}))?
//!             .with_idempotency_key("b47f7b2e-0c70-4bd5-9c0e-3c7ac4f0d2a1")?,
//!     )
//!     .await?;
//! println!("{}", resp.text()?);
//! # Ok(())
//! # }
//! ```

mod constants;

mod algorithm;
pub use algorithm::SignatureAlgorithm;

mod region;
pub use region::{Endpoint, Region};

mod config;
pub use config::Config;

mod credential;
pub use credential::{Credential, Environment, PrivateKey};

mod prepare;
pub use prepare::{ApiRequest, Payload, PreparedRequest};

pub mod canonical;

mod sign_request;
pub use sign_request::{user_agent, RequestSigner};

mod response;
pub use response::ApiResponse;

mod dispatch;
pub use dispatch::{Dispatcher, RetryPolicy};

mod client;
pub use client::Client;
