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

//! Codecs for the individual blocks of an SXF file.
//!
//! Every block starts with a `u32` payload size. Decoders read exactly that many bytes, so
//! a block that carries more than its decoder understands does not desynchronise the rest of
//! the file. Encoders write the block marker, the size and the payload.

pub mod cell;
pub mod column;
pub mod note;
pub mod property;
pub mod reserved;
pub mod sheet;

use crate::{SxfResult, cursor::Cursor, error::Details};
use log::warn;

/// Reads a payload size, checks it against `minimum` and splits the payload off.
pub(crate) fn read_payload<'a>(
    cursor: &mut Cursor<'a>,
    what: &'static str,
    minimum: u32,
) -> SxfResult<(u32, Cursor<'a>)> {
    let declared = cursor.read_u32(what)?;
    if declared < minimum {
        return Err(Details::BlockTooSmall {
            what,
            declared,
            minimum,
        }
        .into());
    }
    let payload = cursor.take(declared as usize, what)?;
    Ok((declared, payload))
}

/// Logs and drops whatever the decoder left unread in `payload`.
pub(crate) fn skip_excess(payload: &mut Cursor, what: &'static str) -> SxfResult<()> {
    let excess = payload.remaining();
    if excess > 0 {
        warn!(
            "Ignoring {excess} unexpected trailing bytes in the {what} at offset {:#x}",
            payload.offset()
        );
        payload.skip(excess, what)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;
    use sxf_test_helper::{TestResult, init, logger::assert_logged};

    #[test]
    fn payload_is_bounded_by_the_declared_size() -> TestResult {
        let data = hex!("00000002 AABB CC");
        let mut cursor = Cursor::new(&data);
        let (declared, mut payload) = read_payload(&mut cursor, "test block", 1)?;
        assert_eq!(declared, 2);
        assert_eq!(payload.read_u16("field")?, 0xAABB);
        assert!(payload.is_empty());
        assert_eq!(cursor.read_u8("next")?, 0xCC);
        Ok(())
    }

    #[test]
    fn undersized_payload_is_rejected() {
        let data = hex!("00000002 AABB");
        let err = read_payload(&mut Cursor::new(&data), "test block", 3).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::BlockTooSmall {
                what: "test block",
                declared: 2,
                minimum: 3,
            }
        ));
    }

    #[test]
    fn payload_past_the_end_is_truncated() {
        let data = hex!("00000010 AABB");
        let err = read_payload(&mut Cursor::new(&data), "test block", 0).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::TruncatedStream {
                what: "test block",
                need: 16,
                have: 2,
                ..
            }
        ));
    }

    #[test]
    fn excess_bytes_are_logged() -> TestResult {
        init();
        let data = hex!("00000003 AABB CC");
        let (_, mut payload) = read_payload(&mut Cursor::new(&data), "test block", 2)?;
        payload.read_u16("field")?;
        skip_excess(&mut payload, "test block")?;
        assert!(payload.is_empty());
        assert_logged("Ignoring 1 unexpected trailing bytes in the test block");
        Ok(())
    }
}
