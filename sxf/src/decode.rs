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

//! Turns a complete SXF buffer into a [`Document`].

use crate::{
    SxfResult,
    block::{cell, note, property, reserved, sheet},
    config::Config,
    cursor::Cursor,
    document::Document,
    error::Details,
    header::{BlockId, read_block_marker, read_preamble},
    util::safe_len,
};
use log::{debug, warn};
use std::collections::HashSet;
use strum::IntoEnumIterator;

/// Decode a whole SXF file held in memory.
///
/// Blocks may appear in any order. A block that appears twice replaces the earlier copy and
/// a missing block keeps its default. Decoding is all or nothing: the first error is returned
/// and no partial document is produced.
///
/// The frame count comes from the file, so padding every column to it is bounded by
/// [`Config::max_allocation_bytes`].
pub fn decode_document(bytes: &[u8], config: &Config) -> SxfResult<Document> {
    let mut cursor = Cursor::new(bytes);
    read_preamble(&mut cursor, config)?;

    let mut document = Document::default();
    let mut seen = HashSet::new();
    while !cursor.is_empty() {
        let offset = cursor.offset();
        let block = read_block_marker(&mut cursor)?;
        debug!("Reading the {block} block at offset {offset:#x}");
        if !seen.insert(block) {
            warn!("The {block} block at offset {offset:#x} replaces an earlier one");
        }
        decode_block(block, &mut cursor, &mut document, config).map_err(|source| Details::Block {
            block,
            offset,
            source,
        })?;
    }

    for block in BlockId::iter().filter(|block| !seen.contains(block)) {
        debug!("No {block} block, keeping the default");
    }
    safe_len(
        document.cell_bytes(document.max_frames()),
        config.max_allocation_bytes,
    )?;
    document.pad_frames();
    Ok(document)
}

fn decode_block(
    block: BlockId,
    cursor: &mut Cursor,
    document: &mut Document,
    config: &Config,
) -> SxfResult<()> {
    match block {
        BlockId::Property => document.property = property::decode(cursor)?,
        BlockId::Note => document.note = note::decode(cursor, config.codepage)?,
        BlockId::ActionSheet => document.action_sheet = sheet::decode(cursor)?,
        BlockId::CellSheet => document.cell_sheet = sheet::decode(cursor)?,
        BlockId::Sound => {
            document.sound = reserved::decode_sound(cursor, config.preserve_reserved)?
        }
        BlockId::Dialogue => document.dialogue = reserved::decode_dialogue(cursor)?,
        BlockId::Draw => document.draw = reserved::decode_draw(cursor)?,
    }
    Ok(())
}

/// Decode a single cell record. Exposed for tools that patch cells in place.
pub fn decode_cell(bytes: &[u8; cell::CELL_RECORD_SIZE]) -> SxfResult<cell::Cell> {
    cell::decode(&mut Cursor::new(bytes))
}
