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

//! The file preamble and the marker that precedes every block.

use crate::{
    SxfResult,
    config::Config,
    cursor::Cursor,
    error::Details,
    util::{write_u8, write_u32},
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::Write;
use strum_macros::{Display, EnumIter};

/// `WBSC` in ASCII.
pub const MAGIC: u32 = 0x5742_5343;
/// The only version tag written. Its meaning is not documented by the format.
pub const VERSION: u32 = 0x0100_0007;
/// First byte of every block marker.
pub const BLOCK_START_CODE: u8 = 0xFF;

/// The kinds of top-level block. Iteration order is the order blocks are written in.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum BlockId {
    Property = 0x01,
    Note = 0x02,
    ActionSheet = 0x03,
    CellSheet = 0x04,
    Sound = 0x05,
    Dialogue = 0x06,
    Draw = 0x07,
}

impl From<BlockId> for u8 {
    fn from(id: BlockId) -> Self {
        id as u8
    }
}

impl TryFrom<u8> for BlockId {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Ok(match id {
            0x01 => BlockId::Property,
            0x02 => BlockId::Note,
            0x03 => BlockId::ActionSheet,
            0x04 => BlockId::CellSheet,
            0x05 => BlockId::Sound,
            0x06 => BlockId::Dialogue,
            0x07 => BlockId::Draw,
            other => return Err(other),
        })
    }
}

/// Reads the magic and version. Returns the version tag.
///
/// A version other than [`VERSION`] is only logged unless [`Config::strict_version`] is set.
pub fn read_preamble(cursor: &mut Cursor, config: &Config) -> SxfResult<u32> {
    let magic = cursor.read_u32("magic")?;
    if magic != MAGIC {
        return Err(Details::BadMagic {
            expected: MAGIC,
            found: magic,
        }
        .into());
    }

    let version = cursor.read_u32("version")?;
    if version != VERSION {
        if config.strict_version {
            return Err(Details::UnsupportedVersion {
                expected: VERSION,
                found: version,
            }
            .into());
        }
        warn!("Reading SXF version {version:#010x}, only {VERSION:#010x} is known");
    }
    Ok(version)
}

pub fn write_preamble<W: Write>(writer: &mut W) -> SxfResult<usize> {
    Ok(write_u32(MAGIC, writer)? + write_u32(VERSION, writer)?)
}

/// Reads a start code and a block id.
pub fn read_block_marker(cursor: &mut Cursor) -> SxfResult<BlockId> {
    let offset = cursor.offset();
    let start_code = cursor.read_u8("block start code")?;
    if start_code != BLOCK_START_CODE {
        return Err(Details::BadBlockMarker {
            offset,
            expected: BLOCK_START_CODE,
            found: start_code,
        }
        .into());
    }

    let offset = cursor.offset();
    let id = cursor.read_u8("block id")?;
    BlockId::try_from(id).map_err(|id| Details::UnknownBlockId { offset, id }.into())
}

pub fn write_block_marker<W: Write>(id: BlockId, writer: &mut W) -> SxfResult<usize> {
    Ok(write_u8(BLOCK_START_CODE, writer)? + write_u8(id.into(), writer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;
    use sxf_test_helper::{TestResult, init, logger::assert_logged};

    #[test]
    fn preamble_round_trip() -> TestResult {
        let mut buffer = Vec::new();
        assert_eq!(write_preamble(&mut buffer)?, 8);
        assert_eq!(buffer, hex!("57425343 01000007"));

        let mut cursor = Cursor::new(&buffer);
        assert_eq!(read_preamble(&mut cursor, &Config::default())?, VERSION);
        assert!(cursor.is_empty());
        Ok(())
    }

    #[test]
    fn bad_magic_is_rejected_before_the_version() {
        let data = hex!("57425344");
        let err = read_preamble(&mut Cursor::new(&data), &Config::default()).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::BadMagic {
                expected: MAGIC,
                found: 0x5742_5344,
            }
        ));
    }

    #[test]
    fn other_versions_pass_through_with_a_warning() -> TestResult {
        init();
        let data = hex!("57425343 01000008");
        let version = read_preamble(&mut Cursor::new(&data), &Config::default())?;
        assert_eq!(version, 0x0100_0008);
        assert_logged("0x01000008");
        Ok(())
    }

    #[test]
    fn strict_version_rejects_other_versions() {
        let data = hex!("57425343 01000008");
        let config = Config::builder().strict_version(true).build();
        let err = read_preamble(&mut Cursor::new(&data), &config).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::UnsupportedVersion {
                expected: VERSION,
                found: 0x0100_0008,
            }
        ));
    }

    #[test]
    fn short_preamble_is_truncated() {
        let data = hex!("574253");
        let err = read_preamble(&mut Cursor::new(&data), &Config::default()).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::TruncatedStream { what: "magic", .. }
        ));
    }

    #[test]
    fn block_ids_round_trip_in_canonical_order() -> TestResult {
        let mut buffer = Vec::new();
        for id in BlockId::iter() {
            assert_eq!(write_block_marker(id, &mut buffer)?, 2);
        }
        assert_eq!(buffer, hex!("FF01 FF02 FF03 FF04 FF05 FF06 FF07"));

        let mut cursor = Cursor::new(&buffer);
        for id in BlockId::iter() {
            assert_eq!(read_block_marker(&mut cursor)?, id);
        }
        Ok(())
    }

    #[test]
    fn marker_errors_are_distinct() {
        let err = read_block_marker(&mut Cursor::new(&[])).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::TruncatedStream {
                what: "block start code",
                ..
            }
        ));

        let err = read_block_marker(&mut Cursor::new(&[0xFF])).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::TruncatedStream {
                what: "block id",
                offset: 1,
                ..
            }
        ));

        let err = read_block_marker(&mut Cursor::new(&[0xFE, 0x01])).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::BadBlockMarker {
                offset: 0,
                expected: 0xFF,
                found: 0xFE,
            }
        ));

        let err = read_block_marker(&mut Cursor::new(&[0xFF, 0x08])).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::UnknownBlockId { offset: 1, id: 0x08 }
        ));
    }
}
