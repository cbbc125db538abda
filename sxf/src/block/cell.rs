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

//! One frame of one column: a marker symbol and the drawing it shows.

use crate::{
    SxfResult,
    cursor::Cursor,
    util::{write_bytes, write_u16},
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fmt, io::Write};

/// Size of a cell record on disk.
pub const CELL_RECORD_SIZE: usize = 10;
/// Width of the ASCII frame index field.
pub const FRAME_INDEX_WIDTH: usize = 8;
/// Largest frame index that survives encoding unchanged.
pub const MAX_FRAME_INDEX: u32 = 99_999_999;

/// Symbol code of a cell.
///
/// Codes other than the named constants are kept as they are.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mark(pub u16);

impl Mark {
    pub const NONE: Mark = Mark(0x0000);
    pub const HASH: Mark = Mark(0x0001);
    pub const CIRCLE: Mark = Mark(0x0002);
    pub const FILLED_CIRCLE: Mark = Mark(0x0004);
    pub const CROSS: Mark = Mark(0x0008);

    /// The symbol drawn for this mark, `None` for [`Mark::NONE`] and unknown codes.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            Mark::HASH => Some("#"),
            Mark::CIRCLE => Some("○"),
            Mark::FILLED_CIRCLE => Some("●"),
            Mark::CROSS => Some("×"),
            _ => None,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Mark> {
        match symbol {
            "#" => Some(Mark::HASH),
            "○" => Some(Mark::CIRCLE),
            "●" => Some(Mark::FILLED_CIRCLE),
            "×" => Some(Mark::CROSS),
            _ => None,
        }
    }

    pub fn is_known(self) -> bool {
        self == Mark::NONE || self.symbol().is_some()
    }
}

impl From<u16> for Mark {
    fn from(code: u16) -> Self {
        Mark(code)
    }
}

impl From<Mark> for u16 {
    fn from(mark: Mark) -> Self {
        mark.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol),
            None => write!(f, "{:#06x}", self.0),
        }
    }
}

/// The marker state of one frame in one column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub mark: Mark,
    /// Number of the original drawing. Only values up to [`MAX_FRAME_INDEX`] fit on disk.
    pub frame_index: u32,
}

impl Cell {
    pub fn new(mark: Mark, frame_index: u32) -> Self {
        Self { mark, frame_index }
    }

    pub fn is_empty(&self) -> bool {
        self.mark == Mark::NONE && self.frame_index == 0
    }
}

pub fn decode(cursor: &mut Cursor) -> SxfResult<Cell> {
    let mark = Mark(cursor.read_u16("cell mark")?);
    let digits = cursor.read_array::<FRAME_INDEX_WIDTH>("cell frame index")?;
    Ok(Cell {
        mark,
        frame_index: parse_frame_index(&digits),
    })
}

pub fn encode<W: Write>(cell: &Cell, writer: &mut W) -> SxfResult<usize> {
    let written = write_u16(cell.mark.0, writer)?;
    Ok(written + write_bytes(&format_frame_index(cell.frame_index), writer)?)
}

/// Parses the leading ASCII digits of the field. No digits means 0.
fn parse_frame_index(field: &[u8; FRAME_INDEX_WIDTH]) -> u32 {
    field
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0, |n, b| n * 10 + u32::from(b - b'0'))
}

/// Left-justified ASCII digits, zero padded. 0 is written as eight zero bytes and
/// numbers wider than the field keep their leading digits.
fn format_frame_index(frame_index: u32) -> [u8; FRAME_INDEX_WIDTH] {
    let mut field = [0u8; FRAME_INDEX_WIDTH];
    if frame_index > 0 {
        let digits = frame_index.to_string();
        if digits.len() > FRAME_INDEX_WIDTH {
            warn!("Frame index {frame_index} does not fit in {FRAME_INDEX_WIDTH} digits");
        }
        let len = digits.len().min(FRAME_INDEX_WIDTH);
        field[..len].copy_from_slice(&digits.as_bytes()[..len]);
    }
    field
}
