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

//! Errors reported while decoding, encoding, loading or saving SXF documents.

use crate::header::BlockId;
use std::{error::Error as _, fmt, path::PathBuf};

/// Errors encountered by the SXF codec.
///
/// To inspect the details of the error use [`details`](Self::details) or
/// [`into_details`](Self::into_details). Errors raised inside a block are wrapped in
/// [`Details::Block`]; [`root_cause`](Self::root_cause) skips that context.
///
/// See [`Details`] for all possible errors.
#[derive(thiserror::Error, Debug)]
#[repr(transparent)]
#[error(transparent)]
pub struct Error {
    details: Box<Details>,
}

impl Error {
    pub fn new(details: Details) -> Self {
        Self {
            details: Box::new(details),
        }
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn into_details(self) -> Details {
        *self.details
    }

    /// The innermost [`Details`], past any block context.
    pub fn root_cause(&self) -> &Details {
        let mut details = self.details();
        while let Details::Block { source, .. } = details {
            details = source.details();
        }
        details
    }
}

impl From<Details> for Error {
    fn from(details: Details) -> Self {
        Self::new(details)
    }
}

#[derive(thiserror::Error)]
pub enum Details {
    #[error("Not an SXF file: expected magic {expected:#010x}, found {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("Unsupported SXF version {found:#010x}, expected {expected:#010x}")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error(
        "Stream ended at offset {offset:#x} while reading {what} (need {need} bytes, have {have})"
    )]
    TruncatedStream {
        offset: usize,
        what: &'static str,
        need: usize,
        have: usize,
    },

    #[error("Expected block start code {expected:#04x} at offset {offset:#x}, found {found:#04x}")]
    BadBlockMarker {
        offset: usize,
        expected: u8,
        found: u8,
    },

    #[error("Unknown block id {id:#04x} at offset {offset:#x}")]
    UnknownBlockId { offset: usize, id: u8 },

    #[error("The {what} declares {declared} bytes, but at least {minimum} are required")]
    BlockTooSmall {
        what: &'static str,
        declared: u32,
        minimum: u32,
    },

    #[error(
        "Column declares {declared} bytes with a {name_len} byte name, leaving {cells_bytes} bytes that are not a whole number of {record_size} byte cells"
    )]
    MalformedColumn {
        declared: u32,
        name_len: u16,
        cells_bytes: i64,
        record_size: usize,
    },

    #[error(
        "Sheet declares {declared} bytes, but its columns add up to at least {accumulated} bytes"
    )]
    MalformedSheet { declared: u32, accumulated: u64 },

    #[error("Unable to allocate {desired} bytes of cells (maximum allowed: {maximum})")]
    MemoryAllocation { desired: usize, maximum: usize },

    #[error("The {what} is {len} bytes long, the format allows at most {max}")]
    FieldTooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Column index {index} does not address an action or cell column ({count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },

    #[error("Failed to read the {block} block at offset {offset:#x}")]
    Block {
        block: BlockId,
        offset: usize,
        #[source]
        source: Error,
    },

    #[error("Failed to read SXF file {}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write SXF file {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write bytes")]
    WriteBytes(#[source] std::io::Error),
}

impl fmt::Debug for Details {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut msg = self.to_string();
        if let Some(e) = self.source() {
            msg.extend([": ", &e.to_string()]);
        }
        write!(f, "{msg}")
    }
}
