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

//! Canonical request and string to sign.

use crate::constants::MERCHANT_ACCOUNTS_SEGMENT;
use crate::SignatureAlgorithm;
use http::Method;
use paysign_core::hash::hex_sha256;
use paysign_core::{Result, SigningRequest};
use std::fmt::Write;

/// Whether the payload of this route is left out of the signature.
///
/// Mutating calls on merchant account routes sign the digest of an empty
/// payload while still sending the real one.
pub fn is_redacted_route(method: &Method, path: &str) -> bool {
    method != Method::GET && path.split('/').any(|s| s == MERCHANT_ACCOUNTS_SEGMENT)
}

/// Semicolon separated list of the sorted header names.
pub fn signed_headers(req: &SigningRequest) -> String {
    req.header_name_to_vec_sorted().join(";")
}

/// Build the canonical request.
///
/// ```text
/// METHOD
/// /path
/// query
/// name:value      (one line per header)
///
/// signed;headers
/// hex(sha256(payload))
/// ```
pub fn canonical_request(req: &SigningRequest) -> Result<String> {
    let payload: &[u8] = if is_redacted_route(&req.method, &req.path) {
        b""
    } else {
        req.body.as_ref()
    };

    let mut f = String::with_capacity(512);
    writeln!(f, "{}", req.method)?;
    writeln!(f, "{}", req.path)?;
    writeln!(f, "{}", req.query_to_string())?;
    f.push_str(&req.header_to_string()?);
    f.push('\n');
    writeln!(f, "{}", signed_headers(req))?;
    f.push_str(&hex_sha256(payload));

    Ok(f)
}

/// Build the string to sign over `content`.
///
/// `content` is the canonical request when signing requests, or the raw
/// payload when signing payloads only.
pub fn string_to_sign(algorithm: SignatureAlgorithm, content: &[u8]) -> String {
    format!("{}\n{}", algorithm.name(), hex_sha256(content))
}
