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

//! Options that change how documents are decoded and encoded.

use crate::{codepage::Codepage, util::DEFAULT_MAX_ALLOCATION_BYTES};

/// Codec configuration.
///
/// The defaults match what the exposure sheet editor has always done: GBK note text,
/// reserved regions re-zeroed on save and any version tag accepted.
///
/// ```
/// use sxf::{Codepage, Config};
///
/// let config = Config::builder()
///     .codepage(Codepage::ShiftJis)
///     .preserve_reserved(true)
///     .build();
/// assert!(!config.strict_version);
/// ```
#[derive(bon::Builder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Codepage of the note text.
    #[builder(default)]
    pub codepage: Codepage,
    /// Keep the sound block's reserved padding instead of writing zeros.
    #[builder(default)]
    pub preserve_reserved: bool,
    /// Reject files whose version tag differs from [`VERSION`](crate::header::VERSION).
    #[builder(default)]
    pub strict_version: bool,
    /// Largest cell storage, in bytes, that padding a decoded document to its frame count
    /// may allocate.
    #[builder(default = DEFAULT_MAX_ALLOCATION_BYTES)]
    pub max_allocation_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}
