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

use hex_literal::hex;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sxf::{BlockId, Config, Details, decode_document};
use sxf_test_helper::{TestResult, init, logger::assert_logged};

const PREAMBLE: [u8; 8] = hex!("57425343 01000007");

fn with_preamble(blocks: &[&[u8]]) -> Vec<u8> {
    let mut data = PREAMBLE.to_vec();
    for block in blocks {
        data.extend_from_slice(block);
    }
    data
}

#[rstest]
#[case(&hex!("00000000 01000007 FF01"))]
#[case(&hex!("43534257 01000007"))]
#[case(&hex!("57425343"))]
#[case(&hex!("FF0100000048"))]
fn foreign_magic_is_rejected_first(#[case] data: &[u8]) {
    let err = decode_document(data, &Config::default()).unwrap_err();
    if data.len() >= 4 && data[..4] != PREAMBLE[..4] {
        assert!(matches!(err.details(), Details::BadMagic { .. }));
    } else {
        assert!(matches!(err.details(), Details::TruncatedStream { .. }));
    }
}

#[test]
fn strict_version_rejects_other_tags() {
    let data = hex!("57425343 01000008");
    let config = Config::builder().strict_version(true).build();
    let err = decode_document(&data, &config).unwrap_err();
    assert!(matches!(
        err.details(),
        Details::UnsupportedVersion {
            found: 0x0100_0008,
            ..
        }
    ));
}

#[test]
fn lenient_version_is_logged() -> TestResult {
    init();
    decode_document(&hex!("57425343 02000000"), &Config::default())?;
    assert_logged("Reading SXF version 0x02000000");
    Ok(())
}

#[test]
fn column_with_partial_cell_is_malformed() {
    // 3 bytes of cells after a nameless column header.
    let data = with_preamble(&[&hex!("FF04 00000011 0000000D 0000 00000001 00000000 303030")]);
    let err = decode_document(&data, &Config::default()).unwrap_err();
    assert!(matches!(
        err.details(),
        Details::Block {
            block: BlockId::CellSheet,
            offset: 8,
            ..
        }
    ));
    assert!(matches!(
        err.root_cause(),
        Details::MalformedColumn {
            declared: 13,
            name_len: 0,
            cells_bytes: 3,
            record_size: 10,
        }
    ));
}

#[test]
fn column_name_longer_than_column_is_malformed() {
    let data = with_preamble(&[&hex!("FF03 0000000E 0000000A 0005 00000001 00000000")]);
    let err = decode_document(&data, &Config::default()).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Details::MalformedColumn {
            cells_bytes: -5,
            ..
        }
    ));
}

#[test]
fn sheet_that_overshoots_is_malformed() {
    // The sheet claims 10 bytes but its only column needs 14.
    let data = with_preamble(&[&hex!("FF03 0000000A 0000000A 0000 00000001 00000000")]);
    let err = decode_document(&data, &Config::default()).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Details::MalformedSheet {
            declared: 10,
            accumulated: 14,
        }
    ));
}

#[rstest]
#[case::property(&hex!("FF01 00000047"), "property block", 72)]
#[case::note(&hex!("FF02 00000002"), "note block", 3)]
#[case::sound(&hex!("FF05 00000063"), "sound block", 100)]
#[case::dialogue(&hex!("FF06 00000003"), "dialogue block", 4)]
#[case::draw(&hex!("FF07 00000007"), "draw block", 8)]
fn undersized_blocks(#[case] block: &[u8], #[case] name: &str, #[case] minimum: u32) {
    let data = with_preamble(&[block]);
    let err = decode_document(&data, &Config::default()).unwrap_err();
    match err.root_cause() {
        Details::BlockTooSmall {
            what,
            declared,
            minimum: reported,
        } => {
            assert_eq!(*what, name);
            assert_eq!(*declared, minimum - 1);
            assert_eq!(*reported, minimum);
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn note_length_past_the_block_is_too_small() {
    let data = with_preamble(&[&hex!("FF02 00000004 0005 41 00")]);
    let err = decode_document(&data, &Config::default()).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Details::BlockTooSmall {
            declared: 4,
            minimum: 8,
            ..
        }
    ));
}

#[test]
fn truncated_block_reports_the_missing_field() {
    let data = with_preamble(&[&hex!("FF06 0000")]);
    let err = decode_document(&data, &Config::default()).unwrap_err();
    match err.root_cause() {
        Details::TruncatedStream {
            offset, need, have, ..
        } => assert_eq!((*offset, *need, *have), (10, 4, 2)),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::missing_id(&hex!("FF"), "block id")]
#[case::unknown_id(&hex!("FF00"), "unknown block id")]
#[case::wrong_start(&hex!("FE01"), "block start code")]
fn marker_errors_are_distinct(#[case] marker: &[u8], #[case] label: &str) {
    let data = with_preamble(&[marker]);
    let err = decode_document(&data, &Config::default()).unwrap_err();
    match (label, err.details()) {
        ("block id", Details::TruncatedStream { what, offset, .. }) => {
            assert_eq!((*what, *offset), ("block id", 9));
        }
        ("unknown block id", Details::UnknownBlockId { id, .. }) => assert_eq!(*id, 0),
        ("block start code", Details::BadBlockMarker { found, .. }) => assert_eq!(*found, 0xFE),
        (label, other) => panic!("Expected {label}, got {other:?}"),
    }
}

#[test]
fn trailing_bytes_inside_a_block_are_skipped() -> TestResult {
    init();
    let data = with_preamble(&[&hex!("FF06 00000006 0000002A BEEF")]);
    let document = decode_document(&data, &Config::default())?;
    assert_eq!(document.dialogue.reserved1, 42);
    assert_logged("Ignoring 2 unexpected trailing bytes in the dialogue block");
    Ok(())
}
