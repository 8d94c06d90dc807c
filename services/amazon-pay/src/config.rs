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

use crate::constants::*;
use crate::{Credential, Endpoint, PrivateKey, Region, SignatureAlgorithm};
use log::{debug, warn};
use paysign_core::utils::Redact;
use paysign_core::{Context, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config for the payment API client.
///
/// All fields are optional so that a config can be assembled from several
/// sources. [`Config::into_credential`] validates the result.
#[derive(Clone, Default)]
pub struct Config {
    /// Public key id registered for the private key.
    pub public_key_id: Option<String>,
    /// PEM encoded private key content.
    pub private_key: Option<String>,
    /// Path to a PEM encoded private key, used when `private_key` is unset.
    pub private_key_path: Option<String>,
    /// Region name or alias, such as `us` or `de`.
    pub region: Option<String>,
    /// Target the sandbox. Only used by legacy key ids.
    pub sandbox: Option<bool>,
    /// Signature algorithm name.
    pub algorithm: Option<String>,
    /// Host replacing the regional one.
    pub override_service_url: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("public_key_id", &Redact::from(&self.public_key_id))
            .field("private_key", &Redact::from(&self.private_key))
            .field("private_key_path", &self.private_key_path)
            .field("region", &self.region)
            .field("sandbox", &self.sandbox)
            .field("algorithm", &self.algorithm)
            .field("override_service_url", &self.override_service_url)
            .finish()
    }
}

impl Config {
    /// Fill unset fields from environment variables.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.public_key_id.is_none() {
            self.public_key_id = ctx.env_var(AMAZON_PAY_PUBLIC_KEY_ID);
        }
        if self.private_key.is_none() {
            self.private_key = ctx.env_var(AMAZON_PAY_PRIVATE_KEY);
        }
        if self.private_key_path.is_none() {
            self.private_key_path = ctx.env_var(AMAZON_PAY_PRIVATE_KEY_PATH);
        }
        if self.region.is_none() {
            self.region = ctx.env_var(AMAZON_PAY_REGION);
        }
        if self.sandbox.is_none() {
            self.sandbox = ctx.env_var(AMAZON_PAY_SANDBOX).and_then(|v| {
                let parsed = parse_bool(&v);
                if parsed.is_none() {
                    warn!("ignoring {AMAZON_PAY_SANDBOX}: not a boolean: {v}");
                }
                parsed
            });
        }
        if self.algorithm.is_none() {
            self.algorithm = ctx.env_var(AMAZON_PAY_ALGORITHM);
        }
        if self.override_service_url.is_none() {
            self.override_service_url = ctx.env_var(AMAZON_PAY_OVERRIDE_SERVICE_URL);
        }
        self
    }

    /// Validate this config and build a credential from it.
    ///
    /// Every check happens here, so a client built from the returned
    /// credential never fails on configuration at call time. The private
    /// key is read through the context's `FileRead` when only a path is set.
    pub async fn into_credential(self, ctx: &Context) -> Result<Credential> {
        let public_key_id = self
            .public_key_id
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::config_invalid("public key id is required"))?;

        let region: Region = self
            .region
            .as_deref()
            .ok_or_else(|| Error::config_invalid("region is required"))?
            .parse()?;

        let algorithm = match self.algorithm.as_deref().filter(|v| !v.is_empty()) {
            Some(v) => v.parse()?,
            None => SignatureAlgorithm::default(),
        };

        let endpoint = Endpoint::resolve(region, self.override_service_url.as_deref())?;

        let pem = match (self.private_key, self.private_key_path) {
            (Some(pem), _) if !pem.trim().is_empty() => pem,
            (_, Some(path)) if !path.trim().is_empty() => {
                let path = ctx.expand_home_dir(&path).ok_or_else(|| {
                    Error::config_invalid(format!(
                        "failed to expand private key path {path}: home dir not found"
                    ))
                })?;
                debug!("loading private key from {path}");
                ctx.file_read_as_string(&path).await?
            }
            _ => {
                return Err(Error::config_invalid(
                    "either private key or private key path is required",
                ))
            }
        };
        let private_key = PrivateKey::from_pem(&pem)?;

        Ok(Credential::new(public_key_id, private_key, region)
            .with_sandbox(self.sandbox.unwrap_or(false))
            .with_algorithm(algorithm)
            .with_endpoint(endpoint))
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
