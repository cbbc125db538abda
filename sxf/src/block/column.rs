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

//! A named track of per-frame cells.

use crate::{
    SxfResult,
    block::cell::{self, CELL_RECORD_SIZE, Cell},
    cursor::Cursor,
    error::Details,
    util::{u16_len, u32_len, write_bytes, write_u16, write_u32},
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Name length prefix, visibility flag and reserved word.
pub const COLUMN_OVERHEAD: usize = 2 + 4 + 4;

/// One column of a sheet. `cells[n]` is frame `n`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub is_visible: u32,
    pub reserved: u32,
    pub cells: Vec<Cell>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_visible: 1,
            reserved: 0,
            cells: Vec::new(),
        }
    }
}

impl Column {
    /// A visible column with `frames` empty cells.
    pub fn new(name: impl Into<String>, frames: usize) -> Self {
        Self {
            name: name.into(),
            cells: vec![Cell::default(); frames],
            ..Self::default()
        }
    }

    pub fn visible(&self) -> bool {
        self.is_visible != 0
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.is_visible = u32::from(visible);
    }

    /// Pads with empty cells up to `frames`. Never removes cells.
    pub fn pad_to(&mut self, frames: usize) {
        if self.cells.len() < frames {
            self.cells.resize(frames, Cell::default());
        }
    }

    /// The payload size written in front of the column.
    pub fn payload_size(&self) -> usize {
        COLUMN_OVERHEAD + self.name.len() + CELL_RECORD_SIZE * self.cells.len()
    }
}

/// Reads a column including its size field. Returns the declared size with it.
pub fn decode(cursor: &mut Cursor) -> SxfResult<(u32, Column)> {
    let declared = cursor.read_u32("column size")?;
    let column = decode_payload(cursor, declared)?;
    Ok((declared, column))
}

/// Reads the `declared` bytes of a column that follow its size field.
pub fn decode_payload(cursor: &mut Cursor, declared: u32) -> SxfResult<Column> {
    if (declared as usize) < COLUMN_OVERHEAD {
        return Err(Details::BlockTooSmall {
            what: "column",
            declared,
            minimum: COLUMN_OVERHEAD as u32,
        }
        .into());
    }
    let mut payload = cursor.take(declared as usize, "column")?;

    let name_len = payload.read_u16("column name length")?;
    let cells_bytes = i64::from(declared) - (COLUMN_OVERHEAD as i64 + i64::from(name_len));
    if cells_bytes < 0 || cells_bytes % CELL_RECORD_SIZE as i64 != 0 {
        return Err(Details::MalformedColumn {
            declared,
            name_len,
            cells_bytes,
            record_size: CELL_RECORD_SIZE,
        }
        .into());
    }

    let name_bytes = payload.read_bytes(name_len.into(), "column name")?;
    let name = match String::from_utf8(name_bytes.to_vec()) {
        Ok(name) => name,
        Err(e) => {
            warn!("Column name is not valid UTF-8, replacing invalid sequences: {e}");
            String::from_utf8_lossy(name_bytes).into_owned()
        }
    };
    let is_visible = payload.read_u32("column visibility")?;
    let reserved = payload.read_u32("column reserved word")?;

    let cell_count = cells_bytes as usize / CELL_RECORD_SIZE;
    let mut cells = Vec::with_capacity(cell_count);
    for _ in 0..cell_count {
        cells.push(cell::decode(&mut payload)?);
    }

    Ok(Column {
        name,
        is_visible,
        reserved,
        cells,
    })
}

/// Writes the column with its size field.
pub fn encode<W: Write>(column: &Column, writer: &mut W) -> SxfResult<usize> {
    let name_len = u16_len(column.name.len(), "column name")?;
    let size = u32_len(column.payload_size(), "column")?;

    let mut written = write_u32(size, writer)?;
    written += write_u16(name_len, writer)?;
    written += write_bytes(column.name.as_bytes(), writer)?;
    written += write_u32(column.is_visible, writer)?;
    written += write_u32(column.reserved, writer)?;
    for cell in &column.cells {
        written += cell::encode(cell, writer)?;
    }
    Ok(written)
}
