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

//! Big-endian read cursor over an in-memory SXF buffer.

use crate::{SxfResult, error::Details};

/// Read cursor over a byte slice. All reads are big-endian.
///
/// Offsets reported in errors are absolute positions in the buffer the outermost cursor
/// was created from, also for cursors returned by [`take`](Self::take).
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute byte position.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Remaining bytes from current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Skip `n` bytes forward.
    pub fn skip(&mut self, n: usize, what: &'static str) -> SxfResult<()> {
        self.ensure(n, what)?;
        self.pos += n;
        Ok(())
    }

    /// Read a slice of `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize, what: &'static str) -> SxfResult<&'a [u8]> {
        self.ensure(n, what)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self, what: &'static str) -> SxfResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N, what)?);
        Ok(array)
    }

    pub fn read_u8(&mut self, what: &'static str) -> SxfResult<u8> {
        self.ensure(1, what)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn read_u16(&mut self, what: &'static str) -> SxfResult<u16> {
        self.read_array(what).map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self, what: &'static str) -> SxfResult<u32> {
        self.read_array(what).map(u32::from_be_bytes)
    }

    /// Split the next `n` bytes off into their own cursor and advance past them.
    pub fn take(&mut self, n: usize, what: &'static str) -> SxfResult<Cursor<'a>> {
        let base = self.offset();
        let data = self.read_bytes(n, what)?;
        Ok(Cursor { data, pos: 0, base })
    }

    fn ensure(&self, n: usize, what: &'static str) -> SxfResult<()> {
        if n > self.remaining() {
            return Err(Details::TruncatedStream {
                offset: self.offset(),
                what,
                need: n,
                have: self.remaining(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;
    use sxf_test_helper::TestResult;

    #[test]
    fn reads_are_big_endian() -> TestResult {
        let data = hex!("0102 03040506 07");
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u16("a")?, 0x0102);
        assert_eq!(cursor.read_u32("b")?, 0x0304_0506);
        assert_eq!(cursor.read_u8("c")?, 0x07);
        assert!(cursor.is_empty());
        Ok(())
    }

    #[test]
    fn truncated_read_reports_offset_and_field() -> TestResult {
        let data = hex!("0000 00");
        let mut cursor = Cursor::new(&data);
        cursor.skip(1, "padding")?;
        let err = cursor.read_u32("frame count").unwrap_err();
        match err.details() {
            Details::TruncatedStream {
                offset,
                what,
                need,
                have,
            } => {
                assert_eq!((*offset, *what, *need, *have), (1, "frame count", 4, 2));
            }
            other => panic!("Unexpected error: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn taken_cursor_keeps_absolute_offsets() -> TestResult {
        let data = hex!("AA BBCC DD");
        let mut cursor = Cursor::new(&data);
        cursor.skip(1, "lead")?;
        let mut inner = cursor.take(2, "payload")?;
        assert_eq!(inner.offset(), 1);
        assert_eq!(inner.read_u8("first")?, 0xBB);
        assert_eq!(inner.offset(), 2);
        let err = inner.read_u16("past the end").unwrap_err();
        assert!(matches!(
            err.details(),
            Details::TruncatedStream { offset: 2, .. }
        ));
        assert_eq!(cursor.read_u8("tail")?, 0xDD);
        Ok(())
    }
}
