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

use crate::ApiResponse;
use backon::{BackoffBuilder, ExponentialBackoff, ExponentialBuilder};
use http::StatusCode;
use log::{debug, warn};
use paysign_core::{Context, Error, ErrorKind, Result, SigningRequest};
use std::time::Duration;

/// When and how often failed attempts are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay unit of the exponential backoff.
    pub base_delay: Duration,
    /// Retry attempts that failed without any response.
    ///
    /// Off by default: a request lost in transit may still have been
    /// processed by the service.
    pub retry_transport_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            retry_transport_errors: false,
        }
    }
}

impl RetryPolicy {
    /// Delays to wait before each retry.
    ///
    /// The first attempt starts right away and retry `n` waits
    /// `base_delay * 2^n`, without jitter. The iterator yields
    /// `max_retries` delays.
    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay.saturating_mul(2))
            .with_max_delay(Duration::MAX)
            .with_factor(2.0)
            .with_max_times(self.max_retries as usize)
            .build()
    }

    /// Whether a response with this status is worth another attempt.
    pub fn is_retryable_status(status: StatusCode) -> bool {
        status == StatusCode::REQUEST_TIMEOUT
            || status == StatusCode::TOO_MANY_REQUESTS
            || status.is_server_error()
    }
}

/// Dispatcher sends signed requests and retries transient failures.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    policy: RetryPolicy,
}

impl Dispatcher {
    /// Create a dispatcher with the given policy.
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Retry policy of this dispatcher.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send `req` until it succeeds, fails permanently or attempts run out.
    ///
    /// Every attempt sends the same signed request. On exhaustion the error
    /// of the last attempt is returned.
    pub async fn dispatch(&self, ctx: &Context, req: &SigningRequest) -> Result<ApiResponse> {
        let mut backoff = self.policy.backoff();
        let mut attempt = 1;

        loop {
            let err = match ctx.http_send(req.to_http_request()?).await {
                Ok(resp) if resp.status().as_u16() < 400 => return Ok(resp.into()),
                Ok(resp) => {
                    let retryable = RetryPolicy::is_retryable_status(resp.status());
                    let err = Error::http_status(resp);
                    if !retryable {
                        return Err(err);
                    }
                    err
                }
                Err(err) if err.kind() == ErrorKind::Transport => {
                    if !self.policy.retry_transport_errors {
                        return Err(err);
                    }
                    err
                }
                Err(err) => return Err(err),
            };

            let Some(delay) = backoff.next() else {
                warn!(
                    "{} {} failed after {attempt} attempts: {err}",
                    req.method, req.path
                );
                return Err(err);
            };
            debug!(
                "attempt {attempt} of {} {} failed, retrying in {delay:?}: {err}",
                req.method, req.path
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
