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

use crate::{Error, Result};
use bytes::Bytes;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use std::str::FromStr;

/// Decomposed request that signing operates on.
///
/// The same value is used to compute the canonical request and to build the
/// outgoing [`http::Request`], so the signed path, query and body are always
/// the ones sent on the wire.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, always starting with `/`.
    pub path: String,
    /// Query parameters, already sorted and percent encoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// HTTP body.
    pub body: Bytes,
}

impl SigningRequest {
    /// Sort query pairs by name and percent encode their values.
    ///
    /// Names are compared byte-wise, so the result doesn't depend on the
    /// order in which parameters were inserted. Pairs with an equal name keep
    /// their relative order.
    pub fn canonicalize_query(
        mut query: Vec<(String, String)>,
        encode_set: &'static AsciiSet,
    ) -> Vec<(String, String)> {
        query.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

        query
            .into_iter()
            .map(|(k, v)| (k, utf8_percent_encode(&v, encode_set).to_string()))
            .collect()
    }

    /// Convert query to string.
    ///
    /// ```shell
    /// [(a, b), (c, "")] => "a=b&c="
    /// ```
    pub fn query_to_string(&self) -> String {
        let mut s = String::with_capacity(16);

        for (idx, (k, v)) in self.query.iter().enumerate() {
            if idx != 0 {
                s.push('&');
            }

            s.push_str(k);
            s.push('=');
            s.push_str(v);
        }

        s
    }

    /// Get header names as sorted vector.
    ///
    /// Header names are stored lowercase by [`HeaderMap`], so this is the
    /// case-insensitive order of the names.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Convert headers to `name:value` lines sorted by name.
    ///
    /// Every line, including the last one, ends with `\n`. Multiple values
    /// of the same header are joined with `,`. Values are written as their
    /// raw bytes, which must be valid UTF-8.
    ///
    /// ```shell
    /// [(b, 2), (a, 1)] => "a:1\nb:2\n"
    /// ```
    pub fn header_to_string(&self) -> Result<String> {
        let mut s = String::with_capacity(256);

        for name in self.header_name_to_vec_sorted() {
            s.push_str(name);
            s.push(':');
            for (idx, value) in self.headers.get_all(name).iter().enumerate() {
                if idx != 0 {
                    s.push(',');
                }
                let value = std::str::from_utf8(value.as_bytes()).map_err(|e| {
                    Error::request_invalid(format!("header {name} is not valid utf-8"))
                        .with_source(anyhow::Error::from(e))
                })?;
                s.push_str(value);
            }
            s.push('\n');
        }

        Ok(s)
    }

    /// Build the request uri from scheme, authority, path and query.
    pub fn uri(&self) -> Result<Uri> {
        let paq = if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_to_string())
        };

        Ok(Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(PathAndQuery::from_str(&paq)?)
            .build()?)
    }

    /// Build the outgoing http request.
    ///
    /// The request can be built any number of times and every build is
    /// byte-identical.
    pub fn to_http_request(&self) -> Result<http::Request<Bytes>> {
        let mut req = http::Request::builder()
            .method(self.method.clone())
            .uri(self.uri()?)
            .body(self.body.clone())?;
        *req.headers_mut() = self.headers.clone();

        Ok(req)
    }
}
