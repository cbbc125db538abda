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

//! An ordered list of columns, stored as the action sheet and the cell sheet blocks.

use crate::{
    SxfResult,
    block::column::{self, Column},
    cursor::Cursor,
    error::Details,
    header::{BlockId, write_block_marker},
    util::{u32_len, write_u32},
};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub columns: Vec<Column>,
}

impl Sheet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Sum of each column's size field and payload.
    pub fn payload_size(&self) -> usize {
        self.columns
            .iter()
            .map(|column| 4 + column.payload_size())
            .sum()
    }

    pub fn pad_to(&mut self, frames: usize) {
        for column in &mut self.columns {
            column.pad_to(frames);
        }
    }
}

/// Reads a sheet from its size field on. The columns must add up to exactly the declared size.
pub fn decode(cursor: &mut Cursor) -> SxfResult<Sheet> {
    let declared = cursor.read_u32("sheet size")?;
    let mut columns = Vec::new();
    let mut accumulated = 0u64;
    while accumulated < u64::from(declared) {
        let column_size = cursor.read_u32("column size")?;
        accumulated += 4 + u64::from(column_size);
        if accumulated > u64::from(declared) {
            return Err(Details::MalformedSheet {
                declared,
                accumulated,
            }
            .into());
        }
        columns.push(column::decode_payload(cursor, column_size)?);
    }
    Ok(Sheet { columns })
}

/// Writes the marker, the size and every column in order.
pub fn encode<W: Write>(sheet: &Sheet, id: BlockId, writer: &mut W) -> SxfResult<usize> {
    let size = u32_len(sheet.payload_size(), "sheet")?;
    let mut written = write_block_marker(id, writer)?;
    written += write_u32(size, writer)?;
    for column in &sheet.columns {
        written += column::encode(column, writer)?;
    }
    Ok(written)
}
