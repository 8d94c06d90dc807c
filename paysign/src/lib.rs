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

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use paysign_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, default_context_with_tls};

#[cfg(feature = "amazon-pay")]
pub mod amazon_pay {
    //! Amazon Pay API v2 signer and client.

    pub use paysign_amazon_pay::*;

    /// Build a client from `config` completed by `AMAZON_PAY_*` env.
    ///
    /// The transport verifies certificates unless the config overrides the
    /// service url.
    #[cfg(feature = "default-context")]
    pub async fn default_client(config: Config) -> crate::Result<Client> {
        let ctx = crate::default_context();
        let credential = config.from_env(&ctx).into_credential(&ctx).await?;

        let ctx = crate::default_context_with_tls(credential.endpoint().tls_verification())?;
        Ok(Client::new(ctx, credential))
    }

}
