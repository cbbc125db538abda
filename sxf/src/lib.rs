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

//! Reading and writing **SXF** exposure sheets.
//!
//! An exposure sheet (the "X-sheet" of traditional animation) lists, frame by frame, which
//! drawing each layer shows. SXF stores one as a sequence of big-endian blocks after an 8 byte
//! preamble: scene properties, a free text note, two column sheets and a few reserved blocks.
//!
//! ```
//! use sxf::{Cell, Config, Document, Mark, decode_document, encode_to_vec};
//!
//! # fn main() -> sxf::SxfResult<()> {
//! let mut document = Document::default();
//! document.cell_sheet.columns.push(sxf::Column::new("A1", 0));
//! // Flat column 0 is the frame counter, 1 is the first cell sheet column here.
//! document.set_cell(1, 2, Cell::new(Mark::CIRCLE, 5))?;
//!
//! let bytes = encode_to_vec(&document, &Config::default())?;
//! let decoded = decode_document(&bytes, &Config::default())?;
//! assert_eq!(decoded.property.max_frames, 3);
//! assert_eq!(decoded.cell_sheet.columns[0].cells[2].frame_index, 5);
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The crate reports through the [`log`](https://docs.rs/log) facade. Recoverable oddities such
//! as an unknown version tag, trailing bytes in a block or a duplicate block are logged at `warn`
//! level and decoding carries on.

pub mod block;
mod codepage;
mod config;
pub mod cursor;
mod decode;
mod document;
mod encode;
pub mod error;
pub mod header;
mod reader;
mod util;
mod writer;

pub use block::{
    cell::{Cell, Mark},
    column::Column,
    note::Note,
    property::{Property, TimeFormat, Visibility},
    reserved::{Dialogue, Draw, Sound},
    sheet::Sheet,
};
pub use codepage::Codepage;
pub use config::Config;
pub use decode::{decode_cell, decode_document};
pub use document::{ColumnArea, Document};
pub use encode::{encode_document, encode_to_vec};
pub use error::{Details, Error};
pub use header::BlockId;
pub use reader::{load_document, load_document_with};
pub use util::DEFAULT_MAX_ALLOCATION_BYTES;
pub use writer::{save_document, save_document_with};

/// A convenience type alias for `Result`s with `Error`s.
pub type SxfResult<T> = Result<T, Error>;
