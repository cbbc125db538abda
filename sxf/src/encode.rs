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

//! Writes a [`Document`] out as a complete SXF stream.

use crate::{
    SxfResult,
    block::{note, property, reserved, sheet},
    config::Config,
    document::Document,
    header::{BlockId, write_preamble},
};
use log::debug;
use std::io::Write;
use strum::IntoEnumIterator;

/// Encode `document` into `writer` and return the number of bytes written.
///
/// Blocks are always written in id order: property, note, action sheet, cell sheet, sound,
/// dialogue, draw. The sound block is sized from `property.max_frames`.
pub fn encode_document<W: Write>(
    document: &Document,
    writer: &mut W,
    config: &Config,
) -> SxfResult<usize> {
    let mut written = write_preamble(writer)?;
    for block in BlockId::iter() {
        let n = match block {
            BlockId::Property => property::encode(&document.property, writer)?,
            BlockId::Note => note::encode(&document.note, writer, config.codepage)?,
            BlockId::ActionSheet => sheet::encode(&document.action_sheet, block, writer)?,
            BlockId::CellSheet => sheet::encode(&document.cell_sheet, block, writer)?,
            BlockId::Sound => reserved::encode_sound(
                &document.sound,
                document.property.max_frames,
                writer,
                config.preserve_reserved,
            )?,
            BlockId::Dialogue => reserved::encode_dialogue(&document.dialogue, writer)?,
            BlockId::Draw => reserved::encode_draw(&document.draw, writer)?,
        };
        debug!("Wrote the {block} block, {n} bytes");
        written += n;
    }
    Ok(written)
}

/// Encode `document` into a fresh buffer.
pub fn encode_to_vec(document: &Document, config: &Config) -> SxfResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_document(document, &mut buffer, config)?;
    Ok(buffer)
}
