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

//! Free text attached to the scene.

use crate::{
    SxfResult,
    block::{read_payload, skip_excess},
    codepage::Codepage,
    cursor::Cursor,
    error::Details,
    header::{BlockId, write_block_marker},
    util::{u16_len, u32_len, write_bytes, write_u8, write_u16, write_u32},
};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Length prefix and flag byte.
pub const NOTE_OVERHEAD: u32 = 2 + 1;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    pub big_font: bool,
}

pub fn decode(cursor: &mut Cursor, codepage: Codepage) -> SxfResult<Note> {
    let (declared, mut payload) = read_payload(cursor, "note block", NOTE_OVERHEAD)?;

    let len = payload.read_u16("note length")?;
    let needed = NOTE_OVERHEAD + u32::from(len);
    if declared < needed {
        return Err(Details::BlockTooSmall {
            what: "note block",
            declared,
            minimum: needed,
        }
        .into());
    }
    let content = codepage.decode(payload.read_bytes(len.into(), "note text")?);
    let big_font = payload.read_u8("note font flag")? != 0;
    skip_excess(&mut payload, "note block")?;

    Ok(Note { content, big_font })
}

pub fn encode<W: Write>(note: &Note, writer: &mut W, codepage: Codepage) -> SxfResult<usize> {
    let bytes = codepage.encode(&note.content);
    let len = u16_len(bytes.len(), "note text")?;
    let size = u32_len(NOTE_OVERHEAD as usize + bytes.len(), "note block")?;

    let mut written = write_block_marker(BlockId::Note, writer)?;
    written += write_u32(size, writer)?;
    written += write_u16(len, writer)?;
    written += write_bytes(&bytes, writer)?;
    written += write_u8(u8::from(note.big_font), writer)?;
    Ok(written)
}
