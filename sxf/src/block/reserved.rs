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

//! Sound, dialogue and draw/text blocks.
//!
//! None of them carry meaningful fields yet; the format only reserves their space.
//! The reserved words are written back as read. The sound block's padding is sized from the
//! document's current frame count and written as zeros, unless
//! [`Config::preserve_reserved`](crate::Config::preserve_reserved) is set, in which case the
//! padding read from the file is kept.

use crate::{
    SxfResult,
    block::{read_payload, skip_excess},
    cursor::Cursor,
    header::{BlockId, write_block_marker},
    util::{u32_len, write_bytes, write_u32, write_zeros},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// The sound block never shrinks below this many frames.
pub const SOUND_MIN_FRAMES: u32 = 24;
/// Reserved padding per frame in the sound block.
pub const SOUND_BYTES_PER_FRAME: usize = 4;
pub const DIALOGUE_SIZE: u32 = 4;
pub const DRAW_SIZE: u32 = 8;

/// Payload size of the sound block for a document of `frames` frames.
pub fn sound_payload_size(frames: u32) -> usize {
    4 + SOUND_BYTES_PER_FRAME * frames.max(SOUND_MIN_FRAMES) as usize
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    pub reserved1: u32,
    /// Padding after the reserved word. Only filled in when decoding with
    /// `preserve_reserved`.
    pub padding: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    pub reserved1: u32,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub reserved1: u32,
    pub reserved2: u32,
}

pub fn decode_sound(cursor: &mut Cursor, preserve_reserved: bool) -> SxfResult<Sound> {
    let minimum = sound_payload_size(SOUND_MIN_FRAMES) as u32;
    let (_, mut payload) = read_payload(cursor, "sound block", minimum)?;
    let reserved1 = payload.read_u32("reserved word")?;
    let rest = payload.read_bytes(payload.remaining(), "sound padding")?;
    let padding = if preserve_reserved {
        rest.to_vec()
    } else {
        Vec::new()
    };
    Ok(Sound { reserved1, padding })
}

/// Writes the sound block sized for `frames`.
pub fn encode_sound<W: Write>(
    sound: &Sound,
    frames: u32,
    writer: &mut W,
    preserve_reserved: bool,
) -> SxfResult<usize> {
    let size = sound_payload_size(frames);
    let padding_len = size - 4;

    let mut written = write_block_marker(BlockId::Sound, writer)?;
    written += write_u32(u32_len(size, "sound block")?, writer)?;
    written += write_u32(sound.reserved1, writer)?;
    if preserve_reserved {
        let kept = sound.padding.len().min(padding_len);
        written += write_bytes(&sound.padding[..kept], writer)?;
        written += write_zeros(padding_len - kept, writer)?;
    } else {
        if !sound.padding.is_empty() {
            debug!("Writing zeros over {} bytes of sound padding", sound.padding.len());
        }
        written += write_zeros(padding_len, writer)?;
    }
    Ok(written)
}

pub fn decode_dialogue(cursor: &mut Cursor) -> SxfResult<Dialogue> {
    let (_, mut payload) = read_payload(cursor, "dialogue block", DIALOGUE_SIZE)?;
    let reserved1 = payload.read_u32("reserved word")?;
    skip_excess(&mut payload, "dialogue block")?;
    Ok(Dialogue { reserved1 })
}

pub fn encode_dialogue<W: Write>(dialogue: &Dialogue, writer: &mut W) -> SxfResult<usize> {
    let mut written = write_block_marker(BlockId::Dialogue, writer)?;
    written += write_u32(DIALOGUE_SIZE, writer)?;
    written += write_u32(dialogue.reserved1, writer)?;
    Ok(written)
}

pub fn decode_draw(cursor: &mut Cursor) -> SxfResult<Draw> {
    let (_, mut payload) = read_payload(cursor, "draw block", DRAW_SIZE)?;
    let reserved1 = payload.read_u32("reserved word")?;
    let reserved2 = payload.read_u32("reserved word")?;
    skip_excess(&mut payload, "draw block")?;
    Ok(Draw {
        reserved1,
        reserved2,
    })
}

pub fn encode_draw<W: Write>(draw: &Draw, writer: &mut W) -> SxfResult<usize> {
    let mut written = write_block_marker(BlockId::Draw, writer)?;
    written += write_u32(DRAW_SIZE, writer)?;
    written += write_u32(draw.reserved1, writer)?;
    written += write_u32(draw.reserved2, writer)?;
    Ok(written)
}
