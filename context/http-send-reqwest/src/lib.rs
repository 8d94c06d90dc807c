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

//! Reqwest-based transport for paysign.
//!
//! `ReqwestHttpSend` implements `HttpSend` from `paysign_core` on top of a
//! [`reqwest::Client`]. Each instance owns its client, and with it its
//! certificate verification policy.
//!
//! ```no_run
//! use paysign_core::{Context, TlsVerification};
//! use paysign_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn example() -> paysign_core::Result<()> {
//! // Production endpoints: verify certificates.
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//!
//! // A self-signed development host only.
//! let dev = ReqwestHttpSend::with_tls_verification(TlsVerification::AcceptInvalidCerts)?;
//! let dev_ctx = Context::new().with_http_send(dev);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::warn;
use paysign_core::{Error, HttpSend, Result, TlsVerification};
use reqwest::{Client, Request};

/// HttpSend implementation backed by reqwest.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    tls: TlsVerification,
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// The client is assumed to verify certificates.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            tls: TlsVerification::Strict,
        }
    }

    /// Create a new ReqwestHttpSend whose client follows the given policy.
    ///
    /// [`TlsVerification::AcceptInvalidCerts`] only affects the client built
    /// here. It is logged at `warn` level since the resulting transport
    /// accepts any certificate.
    pub fn with_tls_verification(tls: TlsVerification) -> Result<Self> {
        let mut builder = Client::builder();
        if tls.is_relaxed() {
            warn!("building http transport with certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;
        Ok(Self { client, tls })
    }

    /// Certificate verification policy of this transport.
    pub fn tls_verification(&self) -> TlsVerification {
        self.tls
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
