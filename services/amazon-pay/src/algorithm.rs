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

use paysign_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Signature algorithm used to sign requests.
///
/// Every variant is RSASSA-PSS over SHA-256 and only differs in its name and
/// salt length. The name is part of both the string to sign and the
/// authorization header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureAlgorithm {
    /// `AMZN-PAY-RSASSA-PSS` with a salt length of 20.
    #[default]
    Default,
    /// `AMZN-PAY-RSASSA-PSS-V2` with a salt length of 32.
    V2,
}

impl SignatureAlgorithm {
    /// All known algorithms.
    pub const ALL: [SignatureAlgorithm; 2] = [SignatureAlgorithm::Default, SignatureAlgorithm::V2];

    /// Name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Default => "AMZN-PAY-RSASSA-PSS",
            SignatureAlgorithm::V2 => "AMZN-PAY-RSASSA-PSS-V2",
        }
    }

    /// PSS salt length in bytes.
    pub fn salt_length(&self) -> usize {
        match self {
            SignatureAlgorithm::Default => 20,
            SignatureAlgorithm::V2 => 32,
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    /// Names are matched exactly.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| Error::config_invalid(format!("not a valid algorithm: {s}")))
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
