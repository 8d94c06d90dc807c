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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Name reported in the user agent.
pub const SDK_NAME: &str = "amazon-pay-api-sdk-rust";
/// Version reported in the user agent.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Version segment of every API path.
pub const API_VERSION: &str = "v2";

// Hosts of each region.
pub const HOST_NA: &str = "pay-api.amazon.com";
pub const HOST_EU: &str = "pay-api.amazon.eu";
pub const HOST_JP: &str = "pay-api.amazon.jp";

// Headers injected into every signed request.
pub const X_AMZ_PAY_REGION: &str = "x-amz-pay-region";
pub const X_AMZ_PAY_HOST: &str = "x-amz-pay-host";
pub const X_AMZ_PAY_DATE: &str = "x-amz-pay-date";
pub const X_AMZ_PAY_IDEMPOTENCY_KEY: &str = "x-amz-pay-idempotency-key";
pub const APPLICATION_JSON: &str = "application/json";

// Path segment of the merchant account management routes.
pub const MERCHANT_ACCOUNTS_SEGMENT: &str = "merchantAccounts";

// Env values used by `Config::from_env`.
pub const AMAZON_PAY_PUBLIC_KEY_ID: &str = "AMAZON_PAY_PUBLIC_KEY_ID";
pub const AMAZON_PAY_PRIVATE_KEY: &str = "AMAZON_PAY_PRIVATE_KEY";
pub const AMAZON_PAY_PRIVATE_KEY_PATH: &str = "AMAZON_PAY_PRIVATE_KEY_PATH";
pub const AMAZON_PAY_REGION: &str = "AMAZON_PAY_REGION";
pub const AMAZON_PAY_SANDBOX: &str = "AMAZON_PAY_SANDBOX";
pub const AMAZON_PAY_ALGORITHM: &str = "AMAZON_PAY_ALGORITHM";
pub const AMAZON_PAY_OVERRIDE_SERVICE_URL: &str = "AMAZON_PAY_OVERRIDE_SERVICE_URL";

/// AsciiSet of the `encodeURIComponent` convention used for query values.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '_', '.', '!', '~', '*', ''', '(' and ')'.
pub static URI_COMPONENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');
