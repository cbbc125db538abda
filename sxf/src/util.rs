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

//! Big-endian write helpers and size conversions shared by the block encoders.

use crate::{SxfResult, error::Details};
use std::io::Write;

/// Default upper bound on the cell storage a decoded document may need. Protects against
/// frame counts that are far larger than the file they come from.
pub const DEFAULT_MAX_ALLOCATION_BYTES: usize = 512 * 1024 * 1024;

/// Checks `len` bytes against `maximum` before anything is allocated.
pub(crate) fn safe_len(len: usize, maximum: usize) -> SxfResult<usize> {
    if len <= maximum {
        Ok(len)
    } else {
        Err(Details::MemoryAllocation {
            desired: len,
            maximum,
        }
        .into())
    }
}

pub(crate) fn write_bytes<W: Write>(bytes: &[u8], writer: &mut W) -> SxfResult<usize> {
    writer.write_all(bytes).map_err(Details::WriteBytes)?;
    Ok(bytes.len())
}

pub(crate) fn write_u8<W: Write>(n: u8, writer: &mut W) -> SxfResult<usize> {
    write_bytes(&[n], writer)
}

pub(crate) fn write_u16<W: Write>(n: u16, writer: &mut W) -> SxfResult<usize> {
    write_bytes(&n.to_be_bytes(), writer)
}

pub(crate) fn write_u32<W: Write>(n: u32, writer: &mut W) -> SxfResult<usize> {
    write_bytes(&n.to_be_bytes(), writer)
}

/// Writes `len` zero bytes.
pub(crate) fn write_zeros<W: Write>(len: usize, writer: &mut W) -> SxfResult<usize> {
    const ZEROS: [u8; 64] = [0; 64];
    let mut left = len;
    while left > 0 {
        let chunk = left.min(ZEROS.len());
        write_bytes(&ZEROS[..chunk], writer)?;
        left -= chunk;
    }
    Ok(len)
}

/// Converts a byte length into the `u16` prefix used by names and note text.
pub(crate) fn u16_len(len: usize, what: &'static str) -> SxfResult<u16> {
    u16::try_from(len).map_err(|_| {
        Details::FieldTooLong {
            what,
            len,
            max: u16::MAX as usize,
        }
        .into()
    })
}

/// Converts a payload length into the `u32` size field every block starts with.
pub(crate) fn u32_len(len: usize, what: &'static str) -> SxfResult<u32> {
    u32::try_from(len).map_err(|_| {
        Details::FieldTooLong {
            what,
            len,
            max: u32::MAX as usize,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sxf_test_helper::TestResult;

    #[test]
    fn integers_are_written_big_endian() -> TestResult {
        let mut buffer = Vec::new();
        assert_eq!(write_u16(0x0102, &mut buffer)?, 2);
        assert_eq!(write_u32(0x0304_0506, &mut buffer)?, 4);
        assert_eq!(write_u8(0x07, &mut buffer)?, 1);
        assert_eq!(buffer, [1, 2, 3, 4, 5, 6, 7]);
        Ok(())
    }

    #[test]
    fn zero_padding_spans_several_chunks() -> TestResult {
        let mut buffer = Vec::new();
        assert_eq!(write_zeros(150, &mut buffer)?, 150);
        assert_eq!(buffer, vec![0; 150]);
        Ok(())
    }

    #[test]
    fn oversized_lengths_are_rejected() {
        let err = u16_len(70_000, "column name").unwrap_err();
        assert!(matches!(
            err.details(),
            Details::FieldTooLong {
                what: "column name",
                len: 70_000,
                max: 65_535,
            }
        ));
        assert!(u16_len(65_535, "column name").is_ok());
    }

    #[test]
    fn allocations_above_the_limit_are_refused() -> TestResult {
        assert_eq!(safe_len(1024, 1024)?, 1024);
        let err = safe_len(1025, 1024).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::MemoryAllocation {
                desired: 1025,
                maximum: 1024,
            }
        ));
        Ok(())
    }
}
