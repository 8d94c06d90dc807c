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

use crate::{ApiRequest, ApiResponse, Credential, Dispatcher, Payload, RequestSigner, RetryPolicy};
use http::HeaderMap;
use paysign_core::{Context, Result};
use std::sync::Arc;

/// Client for the payment API.
///
/// A client is cheap to clone. Clones share the credential and the
/// transport of their [`Context`], and calls on them are independent.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    credential: Arc<Credential>,
    signer: RequestSigner,
    dispatcher: Dispatcher,
}

impl Client {
    /// Create a client sending requests through `ctx`.
    ///
    /// The transport of `ctx` should follow
    /// `credential.endpoint().tls_verification()`.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            ctx,
            credential: Arc::new(credential),
            signer: RequestSigner::new(),
            dispatcher: Dispatcher::default(),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.dispatcher = Dispatcher::new(policy);
        self
    }

    /// Replace the signer.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Credential of this client.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Prepare, sign and send a request, retrying transient failures.
    pub async fn api_call(&self, req: ApiRequest) -> Result<ApiResponse> {
        let prepared = req.prepare(&self.credential)?;
        let signed = self.signer.sign_request(&self.credential, &prepared)?;

        self.dispatcher.dispatch(&self.ctx, &signed).await
    }

    /// Prepare and sign a request without sending it.
    ///
    /// The returned headers include `authorization` and can be sent by any
    /// transport together with the request's qualified path, query and
    /// payload.
    pub fn get_signed_headers(&self, req: ApiRequest) -> Result<HeaderMap> {
        let prepared = req.prepare(&self.credential)?;
        self.signer.sign_headers(&self.credential, &prepared)
    }

    /// Sign a checkout button payload.
    pub fn generate_button_signature(&self, payload: impl Into<Payload>) -> Result<String> {
        self.signer.sign_payload(&self.credential, &payload.into())
    }
}
