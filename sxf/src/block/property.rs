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

//! Scene metadata: frame count, timing, ruler settings and panel visibility.

use crate::{
    SxfResult,
    block::{read_payload, skip_excess},
    cursor::Cursor,
    header::{BlockId, write_block_marker},
    util::{write_u16, write_u32},
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

pub const RESERVED_WORDS: usize = 4;
pub const WIDGET_COUNT: usize = 4;
pub const VISIBILITY_WORDS: usize = 2;

/// Payload size of the property block.
pub const PROPERTY_SIZE: u32 =
    (4 * (7 + RESERVED_WORDS + 3) + 2 * WIDGET_COUNT + 4 * VISIBILITY_WORDS) as u32;

/// How frame positions are shown. Stored as a single bit even though only one may be set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[repr(u32)]
pub enum TimeFormat {
    Frame = 1,
    FootFrame = 2,
    PageFrame = 4,
    SecondFrame = 8,
}

impl TryFrom<u32> for TimeFormat {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TimeFormat::Frame),
            2 => Ok(TimeFormat::FootFrame),
            4 => Ok(TimeFormat::PageFrame),
            8 => Ok(TimeFormat::SecondFrame),
            other => Err(other),
        }
    }
}

/// Panels whose visibility is stored as a bit in [`Property::visibilities`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[repr(u32)]
pub enum Visibility {
    Action = 0,
    Cell = 1,
    Dialogue = 2,
    Sound = 3,
    Camera = 4,
    Note = 5,
    BasicInfo = 6,
}

impl Visibility {
    fn word_and_mask(self) -> (usize, u32) {
        let bit = self as u32;
        ((bit / 32) as usize, 1 << (bit % 32))
    }
}

/// Fixed layout metadata block. `max_frames` is the frame count of the whole document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub reserved1: u32,
    pub max_frames: u32,
    pub layer_count: u32,
    pub fps: u32,
    pub scene_number: u32,
    pub reserved2: u32,
    pub cut_number: u32,
    pub reserved3: [u32; RESERVED_WORDS],
    /// Raw [`TimeFormat`] value; unknown values are kept.
    pub time_format: u32,
    pub ruler_interval: u32,
    pub frame_per_page: u32,
    pub widgets: [u16; WIDGET_COUNT],
    pub visibilities: [u32; VISIBILITY_WORDS],
}

impl Default for Property {
    fn default() -> Self {
        let mut property = Self {
            reserved1: 0,
            max_frames: 0,
            layer_count: 0,
            fps: 24,
            scene_number: 0,
            reserved2: 0,
            cut_number: 0,
            reserved3: [0; RESERVED_WORDS],
            time_format: TimeFormat::Frame as u32,
            ruler_interval: 6,
            frame_per_page: 144,
            widgets: [0; WIDGET_COUNT],
            visibilities: [0; VISIBILITY_WORDS],
        };
        for visibility in Visibility::iter() {
            property.set_visibility(visibility, true);
        }
        property
    }
}

impl Property {
    /// `None` when the stored value is not one of the known formats.
    pub fn time_format(&self) -> Option<TimeFormat> {
        TimeFormat::try_from(self.time_format).ok()
    }

    pub fn set_time_format(&mut self, time_format: TimeFormat) {
        self.time_format = time_format as u32;
    }

    pub fn visibility(&self, visibility: Visibility) -> bool {
        let (word, mask) = visibility.word_and_mask();
        self.visibilities[word] & mask != 0
    }

    pub fn set_visibility(&mut self, visibility: Visibility, visible: bool) {
        let (word, mask) = visibility.word_and_mask();
        if visible {
            self.visibilities[word] |= mask;
        } else {
            self.visibilities[word] &= !mask;
        }
    }
}

pub fn decode(cursor: &mut Cursor) -> SxfResult<Property> {
    let (_, mut payload) = read_payload(cursor, "property block", PROPERTY_SIZE)?;
    let p = &mut payload;

    let reserved1 = p.read_u32("reserved word")?;
    let max_frames = p.read_u32("frame count")?;
    let layer_count = p.read_u32("layer count")?;
    let fps = p.read_u32("fps")?;
    let scene_number = p.read_u32("scene number")?;
    let reserved2 = p.read_u32("reserved word")?;
    let cut_number = p.read_u32("cut number")?;
    let mut reserved3 = [0; RESERVED_WORDS];
    for word in &mut reserved3 {
        *word = p.read_u32("reserved word")?;
    }
    let time_format = p.read_u32("time format")?;
    let ruler_interval = p.read_u32("ruler interval")?;
    let frame_per_page = p.read_u32("frames per page")?;
    let mut widgets = [0; WIDGET_COUNT];
    for widget in &mut widgets {
        *widget = p.read_u16("widget")?;
    }
    let mut visibilities = [0; VISIBILITY_WORDS];
    for word in &mut visibilities {
        *word = p.read_u32("visibility")?;
    }
    skip_excess(p, "property block")?;

    Ok(Property {
        reserved1,
        max_frames,
        layer_count,
        fps,
        scene_number,
        reserved2,
        cut_number,
        reserved3,
        time_format,
        ruler_interval,
        frame_per_page,
        widgets,
        visibilities,
    })
}

pub fn encode<W: Write>(property: &Property, writer: &mut W) -> SxfResult<usize> {
    let mut written = write_block_marker(BlockId::Property, writer)?;
    written += write_u32(PROPERTY_SIZE, writer)?;
    for word in [
        property.reserved1,
        property.max_frames,
        property.layer_count,
        property.fps,
        property.scene_number,
        property.reserved2,
        property.cut_number,
    ] {
        written += write_u32(word, writer)?;
    }
    for word in property.reserved3 {
        written += write_u32(word, writer)?;
    }
    for word in [
        property.time_format,
        property.ruler_interval,
        property.frame_per_page,
    ] {
        written += write_u32(word, writer)?;
    }
    for widget in property.widgets {
        written += write_u16(widget, writer)?;
    }
    for word in property.visibilities {
        written += write_u32(word, writer)?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Details;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;
    use sxf_test_helper::{TestResult, init, logger::assert_logged};

    fn sample() -> Property {
        Property {
            reserved1: 0x1111_1111,
            max_frames: 144,
            layer_count: 3,
            fps: 24,
            scene_number: 12,
            reserved2: 0x2222_2222,
            cut_number: 34,
            reserved3: [1, 2, 3, 4],
            time_format: TimeFormat::PageFrame as u32,
            ruler_interval: 6,
            frame_per_page: 72,
            widgets: [0xA, 0xB, 0xC, 0xD],
            visibilities: [0b101_0101, 0xFFFF_0000],
        }
    }

    #[test]
    fn size_constant() {
        assert_eq!(PROPERTY_SIZE, 72);
    }

    #[test]
    fn layout() -> TestResult {
        let mut buffer = Vec::new();
        let written = encode(&sample(), &mut buffer)?;
        let expected = hex!(
            "FF01 00000048"
            "11111111 00000090 00000003 00000018 0000000C 22222222 00000022"
            "00000001 00000002 00000003 00000004"
            "00000004 00000006 00000048"
            "000A 000B 000C 000D"
            "00000055 FFFF0000"
        );
        assert_eq!(buffer, expected);
        assert_eq!(written, expected.len());
        Ok(())
    }

    #[test]
    fn round_trip_keeps_reserved_words() -> TestResult {
        let mut buffer = Vec::new();
        encode(&sample(), &mut buffer)?;
        let mut cursor = Cursor::new(&buffer[2..]);
        assert_eq!(decode(&mut cursor)?, sample());
        assert!(cursor.is_empty());
        Ok(())
    }

    #[test]
    fn excess_bytes_are_skipped() -> TestResult {
        init();
        let mut buffer = Vec::new();
        encode(&sample(), &mut buffer)?;
        buffer[5] += 4;
        buffer.extend_from_slice(&hex!("CAFEBABE FF"));

        let mut cursor = Cursor::new(&buffer[2..]);
        assert_eq!(decode(&mut cursor)?, sample());
        assert_eq!(cursor.read_u8("next block")?, 0xFF);
        assert_logged("Ignoring 4 unexpected trailing bytes in the property block");
        Ok(())
    }

    #[test]
    fn too_small() {
        let data = hex!("00000047");
        let err = decode(&mut Cursor::new(&data)).unwrap_err();
        assert!(matches!(
            err.details(),
            Details::BlockTooSmall {
                what: "property block",
                declared: 71,
                minimum: 72,
            }
        ));
    }

    #[test]
    fn visibility_bits() {
        let mut property = sample();
        assert!(property.visibility(Visibility::Action));
        assert!(!property.visibility(Visibility::Cell));
        assert!(property.visibility(Visibility::Dialogue));
        assert!(property.visibility(Visibility::BasicInfo));

        property.set_visibility(Visibility::Action, false);
        property.set_visibility(Visibility::Cell, true);
        assert_eq!(property.visibilities, [0b101_0110, 0xFFFF_0000]);
    }

    #[test]
    fn default_shows_every_panel() {
        let property = Property::default();
        for visibility in Visibility::iter() {
            assert!(property.visibility(visibility), "{visibility} is hidden");
        }
        assert_eq!(property.visibilities, [0x7F, 0]);
        assert_eq!(property.time_format(), Some(TimeFormat::Frame));
    }

    #[test]
    fn time_format_values() {
        let mut property = Property::default();
        for format in TimeFormat::iter() {
            property.set_time_format(format);
            assert_eq!(property.time_format(), Some(format));
        }
        property.time_format = 3;
        assert_eq!(property.time_format(), None);
        assert_eq!(property.time_format, 3);
    }
}
