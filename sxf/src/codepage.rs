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

//! Text encodings available for the note block.

use encoding_rs::{Encoding, GBK, SHIFT_JIS, UTF_8};
use log::warn;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The 8-bit codepage note text is stored in.
///
/// Exposure sheets written by Chinese installations use GBK, Japanese ones Shift-JIS.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Codepage {
    #[default]
    Gbk,
    #[strum(to_string = "shift-jis", serialize = "shift_jis", serialize = "sjis")]
    ShiftJis,
    #[strum(to_string = "utf-8", serialize = "utf8")]
    Utf8,
}

impl Codepage {
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Codepage::Gbk => GBK,
            Codepage::ShiftJis => SHIFT_JIS,
            Codepage::Utf8 => UTF_8,
        }
    }

    /// Decodes `bytes`, replacing malformed sequences with U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        let (text, had_errors) = self.encoding().decode_without_bom_handling(bytes);
        if had_errors {
            warn!("Replaced malformed {self} sequences while decoding text");
        }
        text.into_owned()
    }

    /// Encodes `text`. Characters the codepage cannot represent are written as numeric
    /// character references.
    pub fn encode(self, text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = self.encoding().encode(text);
        if had_errors {
            warn!("Text contains characters that {self} cannot represent");
        }
        bytes.into_owned()
    }
}
