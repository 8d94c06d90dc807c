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

//! Core components for signing and sending payment API requests.
//!
//! This crate provides the foundational types shared by the paysign ecosystem.
//! Service crates build their canonicalization and signing logic on top of it.
//!
//! ## Overview
//!
//! The crate is built around a few concepts:
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending and environment access
//! - **Error**: A single error type with an [`ErrorKind`] that callers can match on
//! - **SigningRequest**: A decomposed HTTP request that canonicalization operates on
//! - **TlsVerification**: The per-client certificate verification policy of a transport
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use paysign_core::{Context, HttpSend, Result};
//! use async_trait::async_trait;
//!
//! // Plug in your own transport.
//! #[derive(Debug)]
//! struct MyHttpSend;
//!
//! #[async_trait]
//! impl HttpSend for MyHttpSend {
//!     async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         todo!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_http_send(MyHttpSend);
//!
//! let req = http::Request::builder()
//!     .method("GET")
//!     .uri("https://example.com")
//!     .body(Bytes::new())?;
//! let _resp = ctx.http_send(req).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Hashing and encoding utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod request;
pub use request::SigningRequest;

mod tls;
pub use tls::TlsVerification;
