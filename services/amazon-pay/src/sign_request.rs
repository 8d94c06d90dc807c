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

use crate::canonical::{canonical_request, signed_headers, string_to_sign};
use crate::constants::*;
use crate::{Credential, Payload, PreparedRequest, SignatureAlgorithm};
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::uri::Scheme;
use http::{HeaderMap, HeaderValue};
use log::debug;
use paysign_core::hash::base64_encode;
use paysign_core::time::{format_iso8601, now, DateTime};
use paysign_core::{Error, Result, SigningRequest};
use rsa::pss::BlindedSigningKey;
use rsa::sha2::Sha256;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;

/// RequestSigner signs payment API requests and payloads.
///
/// Signatures are RSASSA-PSS over SHA-256 with the salt length of the
/// credential's [`SignatureAlgorithm`]. PSS is randomized, so signing the
/// same input twice yields different signatures that both verify.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign a prepared request into the request sent on the wire.
    ///
    /// The returned request carries the caller headers, the injected
    /// `x-amz-pay-*`, `content-type`, `accept` and `user-agent` headers and
    /// the `authorization` header. Injected headers replace caller headers of
    /// the same name.
    pub fn sign_request(&self, cred: &Credential, req: &PreparedRequest) -> Result<SigningRequest> {
        let now = self.time.unwrap_or_else(now);

        let mut headers = req.headers().clone();
        headers.remove(AUTHORIZATION);
        headers.insert(
            X_AMZ_PAY_REGION,
            HeaderValue::from_static(cred.region().as_str()),
        );
        headers.insert(
            X_AMZ_PAY_HOST,
            HeaderValue::from_str(cred.endpoint().host())?,
        );
        headers.insert(X_AMZ_PAY_DATE, HeaderValue::from_str(&format_iso8601(now))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_str(&user_agent())?);

        let mut signing_req = SigningRequest {
            method: req.method().clone(),
            scheme: Scheme::HTTPS,
            authority: cred.endpoint().authority().clone(),
            path: format!("/{}", req.path()),
            query: req.query().to_vec(),
            headers,
            body: req
                .body()
                .map(|v| Bytes::from(v.to_string()))
                .unwrap_or_default(),
        };

        let canonical = canonical_request(&signing_req)?;
        debug!("calculated canonical request: {canonical}");

        let string_to_sign = string_to_sign(cred.algorithm(), canonical.as_bytes());
        debug!("calculated string to sign: {string_to_sign}");

        let signature = sign(
            cred.private_key().as_rsa(),
            cred.algorithm(),
            string_to_sign.as_bytes(),
        )?;

        let mut authorization = HeaderValue::from_str(&format!(
            "{} PublicKeyId={}, SignedHeaders={}, Signature={}",
            cred.algorithm().name(),
            cred.public_key_id(),
            signed_headers(&signing_req),
            signature
        ))?;
        authorization.set_sensitive(true);
        signing_req.headers.insert(AUTHORIZATION, authorization);

        Ok(signing_req)
    }

    /// Sign a prepared request and return only its headers.
    pub fn sign_headers(&self, cred: &Credential, req: &PreparedRequest) -> Result<HeaderMap> {
        Ok(self.sign_request(cred, req)?.headers)
    }

    /// Sign a payload on its own, as done for checkout button signatures.
    ///
    /// The payload is serialized once and the signature covers exactly
    /// those bytes.
    pub fn sign_payload(&self, cred: &Credential, payload: &Payload) -> Result<String> {
        let body = payload.to_body()?;
        let string_to_sign = string_to_sign(cred.algorithm(), body.as_bytes());
        debug!("calculated payload string to sign: {string_to_sign}");

        sign(
            cred.private_key().as_rsa(),
            cred.algorithm(),
            string_to_sign.as_bytes(),
        )
    }
}

/// User agent sent with every request.
pub fn user_agent() -> String {
    format!(
        "{SDK_NAME}/{SDK_VERSION} (Rust; {}/{})",
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

fn sign(key: &RsaPrivateKey, algorithm: SignatureAlgorithm, content: &[u8]) -> Result<String> {
    let signing_key =
        BlindedSigningKey::<Sha256>::new_with_salt_len(key.clone(), algorithm.salt_length());
    let signature = signing_key
        .try_sign_with_rng(&mut rand::thread_rng(), content)
        .map_err(|e| Error::unexpected(format!("failed to sign: {e}")))?;

    Ok(base64_encode(&signature.to_bytes()))
}
