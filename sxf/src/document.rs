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

//! The in-memory exposure sheet.

use crate::{
    SxfResult,
    block::{
        cell::Cell,
        column::Column,
        note::Note,
        property::Property,
        reserved::{Dialogue, Draw, Sound},
        sheet::Sheet,
    },
    error::Details,
    util::{DEFAULT_MAX_ALLOCATION_BYTES, safe_len},
};
use serde::{Deserialize, Serialize};

/// Where a flat column index of the grid view lands.
///
/// The grid shows a Frame column first, then the action sheet's columns, then the cell
/// sheet's. The indexes carried by `Action` and `Cell` are positions inside that sheet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ColumnArea {
    Frame,
    Action(usize),
    Cell(usize),
    OutOfRange,
}

/// A whole SXF file.
///
/// Every column is expected to hold one cell per frame, `property.max_frames` in total.
/// Decoding pads short columns; [`set_cell`](Self::set_cell) keeps that true when it grows the
/// document.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub property: Property,
    pub note: Note,
    pub action_sheet: Sheet,
    pub cell_sheet: Sheet,
    pub sound: Sound,
    pub dialogue: Dialogue,
    pub draw: Draw,
}

impl Document {
    pub fn max_frames(&self) -> usize {
        self.property.max_frames as usize
    }

    /// Number of grid columns: 0 for a document without columns, otherwise every column of
    /// both sheets plus the Frame column.
    pub fn flat_column_count(&self) -> usize {
        let columns = self.action_sheet.columns.len() + self.cell_sheet.columns.len();
        if columns == 0 { 0 } else { columns + 1 }
    }

    pub fn column_area(&self, index: usize) -> ColumnArea {
        if index == 0 {
            return ColumnArea::Frame;
        }
        let index = index - 1;
        let actions = self.action_sheet.columns.len();
        if index < actions {
            return ColumnArea::Action(index);
        }
        let index = index - actions;
        if index < self.cell_sheet.columns.len() {
            ColumnArea::Cell(index)
        } else {
            ColumnArea::OutOfRange
        }
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        match self.column_area(index) {
            ColumnArea::Action(i) => self.action_sheet.columns.get(i),
            ColumnArea::Cell(i) => self.cell_sheet.columns.get(i),
            ColumnArea::Frame | ColumnArea::OutOfRange => None,
        }
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        match self.column_area(index) {
            ColumnArea::Action(i) => self.action_sheet.columns.get_mut(i),
            ColumnArea::Cell(i) => self.cell_sheet.columns.get_mut(i),
            ColumnArea::Frame | ColumnArea::OutOfRange => None,
        }
    }

    /// Bytes the cells of every column take once each holds `frames` cells.
    pub fn cell_bytes(&self, frames: usize) -> usize {
        let columns = self.action_sheet.columns.len() + self.cell_sheet.columns.len();
        columns
            .saturating_mul(frames)
            .saturating_mul(size_of::<Cell>())
    }

    /// Pads every column of both sheets with empty cells up to `max_frames`.
    pub fn pad_frames(&mut self) {
        let frames = self.max_frames();
        self.action_sheet.pad_to(frames);
        self.cell_sheet.pad_to(frames);
    }

    /// Stores `cell` at `frame` of the column at flat `index`.
    ///
    /// Writing past the last frame grows `max_frames` to `frame + 1` and pads every column,
    /// as long as the padded cells stay within
    /// [`DEFAULT_MAX_ALLOCATION_BYTES`](crate::DEFAULT_MAX_ALLOCATION_BYTES).
    pub fn set_cell(&mut self, index: usize, frame: usize, cell: Cell) -> SxfResult<()> {
        if self.column(index).is_none() {
            return Err(Details::ColumnOutOfRange {
                index,
                count: self.flat_column_count(),
            }
            .into());
        }
        let too_long = |len| Details::FieldTooLong {
            what: "frame count",
            len,
            max: u32::MAX as usize,
        };
        let frames = frame.checked_add(1).ok_or(too_long(usize::MAX))?;
        if frames > self.max_frames() {
            let max_frames = u32::try_from(frames).map_err(|_| too_long(frames))?;
            safe_len(self.cell_bytes(frames), DEFAULT_MAX_ALLOCATION_BYTES)?;
            self.property.max_frames = max_frames;
        }
        self.pad_frames();

        if let Some(column) = self.column_mut(index) {
            column.pad_to(frames);
            column.cells[frame] = cell;
        }
        Ok(())
    }
}
