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

/// Certificate verification policy of a transport.
///
/// The policy belongs to a single transport instance, which in turn belongs
/// to a single client. There is no process-wide switch: relaxing
/// verification for one client never affects another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsVerification {
    /// Verify server certificates against the system trust roots.
    #[default]
    Strict,
    /// Accept any server certificate, including self-signed ones.
    ///
    /// # Warning
    ///
    /// This disables protection against man-in-the-middle attacks. It only
    /// exists for non-production hosts configured through a service URL
    /// override and must never be used against a production endpoint.
    AcceptInvalidCerts,
}

impl TlsVerification {
    /// Returns true if certificate verification is relaxed.
    pub fn is_relaxed(&self) -> bool {
        matches!(self, TlsVerification::AcceptInvalidCerts)
    }
}
