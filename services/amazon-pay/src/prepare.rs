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

use crate::constants::{API_VERSION, URI_COMPONENT_ENCODE_SET, X_AMZ_PAY_IDEMPOTENCY_KEY};
use crate::Credential;
use http::header::IntoHeaderName;
use http::{HeaderMap, HeaderValue, Method};
use paysign_core::{Error, Result, SigningRequest};
use serde::Serialize;

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Pre-serialized payload, sent and signed as is.
    Text(String),
    /// Structured payload, serialized once before signing.
    Json(serde_json::Value),
}

impl Payload {
    /// Build a structured payload from any serializable value.
    ///
    /// Struct fields keep their declaration order.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Payload::Json(serde_json::to_value(value)?))
    }

    /// Serialize the payload into the exact string that is signed and sent.
    pub fn to_body(&self) -> Result<String> {
        match self {
            Payload::Text(s) => Ok(s.clone()),
            Payload::Json(v) => Ok(serde_json::to_string(v)?),
        }
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

/// A JSON string is taken as pre-serialized text, any other value is
/// serialized.
impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Payload::Text(s),
            v => Payload::Json(v),
        }
    }
}

/// A call to the payment API, described by the caller.
///
/// The path is the resource path without environment or version segments,
/// such as `checkoutSessions/{id}`. It is qualified exactly once by
/// [`ApiRequest::prepare`], which consumes the request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    payload: Option<Payload>,
    headers: HeaderMap,
    query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a request without payload, headers or query.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Create a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set the payload.
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Set a structured payload from a serializable value.
    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self> {
        Ok(self.with_payload(Payload::json(value)?))
    }

    /// Set a header, replacing any previous value of the same name.
    ///
    /// Values are signed as their raw bytes, so they must be valid UTF-8.
    pub fn with_header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merge headers, replacing previous values of the same names.
    ///
    /// Every value of a multi-valued header is kept.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        let mut last = None;
        for (name, value) in headers {
            match name {
                Some(name) => {
                    self.headers.insert(name.clone(), value);
                    last = Some(name);
                }
                // Further values of the previous name.
                None => {
                    if let Some(name) = &last {
                        self.headers.append(name, value);
                    }
                }
            }
        }
        self
    }

    /// Add a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set the idempotency key of a mutating call.
    pub fn with_idempotency_key(self, key: &str) -> Result<Self> {
        let value = HeaderValue::from_str(key)?;
        Ok(self.with_header(X_AMZ_PAY_IDEMPOTENCY_KEY, value))
    }

    /// HTTP method of this request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Resource path of this request.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Qualify and normalize this request for the given credential.
    ///
    /// - only GET, POST, PATCH and DELETE are accepted.
    /// - the path gets its environment and version segments.
    /// - the payload is serialized once.
    /// - query parameters are sorted and encoded once.
    pub fn prepare(self, credential: &Credential) -> Result<PreparedRequest> {
        if !matches!(
            self.method,
            Method::GET | Method::POST | Method::PATCH | Method::DELETE
        ) {
            return Err(Error::request_invalid(format!(
                "unsupported http method: {}",
                self.method
            )));
        }

        let body = self.payload.as_ref().map(Payload::to_body).transpose()?;

        Ok(PreparedRequest {
            method: self.method,
            path: qualify_path(credential, &self.path),
            query: SigningRequest::canonicalize_query(self.query, &URI_COMPONENT_ENCODE_SET),
            headers: self.headers,
            body,
        })
    }
}

/// A request whose path is qualified and whose payload is serialized.
///
/// It can only be obtained from [`ApiRequest::prepare`] and can't be
/// prepared again.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<String>,
}

impl PreparedRequest {
    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Qualified path, without leading `/`, such as `live/v2/charges`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, sorted by name with encoded values.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Caller headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serialized payload, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Prefix a resource path with its environment and version segments.
pub(crate) fn qualify_path(credential: &Credential, fragment: &str) -> String {
    let fragment = fragment.strip_prefix('/').unwrap_or(fragment);
    match credential.environment().path_prefix() {
        Some(env) => format!("{env}/{API_VERSION}/{fragment}"),
        None => format!("{API_VERSION}/{fragment}"),
    }
}
