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

use crate::constants::{HOST_EU, HOST_JP, HOST_NA};
use http::uri::Authority;
use paysign_core::{Error, Result, TlsVerification};
use std::fmt;
use std::str::FromStr;

/// Region of the payment API.
///
/// Parsing is case-insensitive and accepts the country aliases used by
/// merchants: `us` maps to [`Region::Na`], `de` and `uk` map to
/// [`Region::Eu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// North America.
    Na,
    /// Europe.
    Eu,
    /// Japan.
    Jp,
}

impl Region {
    /// Canonical region identifier, sent as `x-amz-pay-region`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Na => "na",
            Region::Eu => "eu",
            Region::Jp => "jp",
        }
    }

    /// Production API host of this region.
    pub fn host(&self) -> &'static str {
        match self {
            Region::Na => HOST_NA,
            Region::Eu => HOST_EU,
            Region::Jp => HOST_JP,
        }
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" | "us" => Ok(Region::Na),
            "eu" | "de" | "uk" => Ok(Region::Eu),
            "jp" => Ok(Region::Jp),
            _ => Err(Error::config_invalid(format!("unknown region: {s}"))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where requests of a client are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    authority: Authority,
    tls: TlsVerification,
}

impl Endpoint {
    /// Production endpoint of a region.
    pub fn regional(region: Region) -> Self {
        Self {
            authority: Authority::from_static(region.host()),
            tls: TlsVerification::Strict,
        }
    }

    /// Resolve the endpoint of a region.
    ///
    /// Without an override the fixed host of the region is used and
    /// certificates are verified.
    ///
    /// # Service URL override
    ///
    /// An override replaces the regional host. It exists for non-production
    /// hosts that usually present self-signed certificates, so the resolved
    /// endpoint carries [`TlsVerification::AcceptInvalidCerts`]. The relaxed
    /// policy only applies to transports built from this endpoint.
    ///
    /// The override is a `host[:port]`; a leading `https://` and trailing
    /// slashes are accepted and stripped. Anything else, such as a path, is
    /// rejected as invalid configuration.
    pub fn resolve(region: Region, override_service_url: Option<&str>) -> Result<Self> {
        let Some(url) = override_service_url.filter(|v| !v.trim().is_empty()) else {
            return Ok(Self::regional(region));
        };

        let url = url.trim();
        let host = url
            .strip_prefix("https://")
            .unwrap_or(url)
            .trim_end_matches('/');
        if host.contains('/') || host.contains('?') {
            return Err(Error::config_invalid(format!(
                "override service url must be a host, got: {url}"
            )));
        }
        let authority = Authority::from_str(host).map_err(|e| {
            Error::config_invalid(format!("invalid override service url: {url}")).with_source(e)
        })?;

        Ok(Self {
            authority,
            tls: TlsVerification::AcceptInvalidCerts,
        })
    }

    /// Host (and optional port) of this endpoint, sent as `x-amz-pay-host`.
    pub fn host(&self) -> &str {
        self.authority.as_str()
    }

    /// Authority of this endpoint.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Certificate verification policy for transports talking to this endpoint.
    pub fn tls_verification(&self) -> TlsVerification {
        self.tls
    }
}
