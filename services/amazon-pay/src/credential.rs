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

use crate::{Endpoint, Region, SignatureAlgorithm};
use paysign_core::utils::Redact;
use paysign_core::{Error, Result};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// RSA private key used to sign requests.
///
/// The key is only ever read by the signing primitive. It is never
/// serialized, sent or printed: `Debug` shows a placeholder.
#[derive(Clone)]
pub struct PrivateKey(Arc<RsaPrivateKey>);

impl PrivateKey {
    /// Parse a PEM encoded key, either PKCS#8 (`BEGIN PRIVATE KEY`) or
    /// PKCS#1 (`BEGIN RSA PRIVATE KEY`).
    pub fn from_pem(pem: &str) -> Result<Self> {
        let pem = pem.trim();
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| Error::credential_invalid(format!("failed to parse private key: {e}")))?;

        Ok(Self(Arc::new(key)))
    }

    /// Public half of the key, for verifying signatures.
    pub fn public_key(&self) -> RsaPublicKey {
        self.0.to_public_key()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self(Arc::new(key))
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Environment a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// The key id itself is bound to live or sandbox, the path carries no
    /// environment segment.
    Unified,
    /// Legacy key id, production path prefix.
    Live,
    /// Legacy key id, sandbox path prefix.
    Sandbox,
}

impl Environment {
    /// Detect the environment of a key id.
    ///
    /// Key ids starting with `LIVE` or `SANDBOX` (any case) select unified
    /// endpoints and the `sandbox` flag is ignored.
    pub fn detect(public_key_id: &str, sandbox: bool) -> Self {
        let id = public_key_id.to_ascii_uppercase();
        if id.starts_with("LIVE") || id.starts_with("SANDBOX") {
            Environment::Unified
        } else if sandbox {
            Environment::Sandbox
        } else {
            Environment::Live
        }
    }

    /// Leading path segment of this environment, if any.
    pub fn path_prefix(&self) -> Option<&'static str> {
        match self {
            Environment::Unified => None,
            Environment::Live => Some("live"),
            Environment::Sandbox => Some("sandbox"),
        }
    }
}

/// Credential holds everything needed to sign and address requests.
///
/// A credential is immutable once built; clients share it behind an `Arc`.
#[derive(Clone)]
pub struct Credential {
    public_key_id: String,
    private_key: PrivateKey,
    region: Region,
    sandbox: bool,
    algorithm: SignatureAlgorithm,
    endpoint: Endpoint,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("public_key_id", &Redact::from(&self.public_key_id))
            .field("private_key", &self.private_key)
            .field("region", &self.region)
            .field("sandbox", &self.sandbox)
            .field("algorithm", &self.algorithm)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Credential {
    /// Create a credential for the production host of `region` with the
    /// default algorithm.
    pub fn new(public_key_id: impl Into<String>, private_key: PrivateKey, region: Region) -> Self {
        Self {
            public_key_id: public_key_id.into(),
            private_key,
            region,
            sandbox: false,
            algorithm: SignatureAlgorithm::Default,
            endpoint: Endpoint::regional(region),
        }
    }

    /// Target the sandbox for legacy key ids.
    ///
    /// Ignored for key ids that carry their environment.
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Sign with the given algorithm.
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Send requests to the given endpoint.
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Public key id, echoed in the authorization header.
    pub fn public_key_id(&self) -> &str {
        &self.public_key_id
    }

    /// Private key used for signing.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Region of the account.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Environment requests are qualified for.
    pub fn environment(&self) -> Environment {
        Environment::detect(&self.public_key_id, self.sandbox)
    }

    /// Signature algorithm.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}
