//! LED strip commands
//!
//! Value formats:
//! - clear: empty
//! - set-color: `[r, g, b]`
//! - set-indexed-color: `[index, r, g, b]`
//! - set-five-colors: five consecutive `[r, g, b]` triples

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::commands::{
    TLV_TYPE_PIXELS_CLEAR, TLV_TYPE_PIXELS_SET_COLOR, TLV_TYPE_PIXELS_SET_FIVE_COLORS,
    TLV_TYPE_PIXELS_SET_INDEXED_COLOR,
};
use crate::errors::{CommandError, Result, TlvError};
use crate::protocol::dispatch::{Command, DispatchTable};
use crate::protocol::tlv;

/// Bytes per color triple
pub const RGB_LEN: usize = 3;

/// Number of addressable pixels on the reference strip
pub const STRIP_LEN: usize = 5;

// ----------------------------------------------------------------------------
// Color Codec
// ----------------------------------------------------------------------------

/// One RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encode to wire bytes
    pub fn to_bytes(self) -> [u8; RGB_LEN] {
        [self.r, self.g, self.b]
    }

    /// Decode a color from `value` starting at `offset`
    pub fn from_bytes_at(value: &[u8], offset: usize) -> core::result::Result<Self, CommandError> {
        if value.len() < offset + RGB_LEN {
            return Err(CommandError::ValueTooShort {
                expected: offset + RGB_LEN,
                actual: value.len(),
            });
        }
        Ok(Self::new(value[offset], value[offset + 1], value[offset + 2]))
    }
}

// ----------------------------------------------------------------------------
// Actuator Trait
// ----------------------------------------------------------------------------

/// External LED strip driver the handlers act on
pub trait PixelStrip {
    /// Turn every pixel off
    fn clear(&mut self) -> Result<()>;

    /// Set every pixel to one color
    fn set_color(&mut self, color: Rgb) -> Result<()>;

    /// Set a single pixel
    fn set_indexed_color(&mut self, index: u8, color: Rgb) -> Result<()>;
}

// ----------------------------------------------------------------------------
// Value Encoders
// ----------------------------------------------------------------------------

/// Encode a pixels-clear record
pub fn encode_clear() -> core::result::Result<Vec<u8>, TlvError> {
    tlv::encode(TLV_TYPE_PIXELS_CLEAR, &[])
}

/// Encode a pixels-set-color record
pub fn encode_set_color(color: Rgb) -> core::result::Result<Vec<u8>, TlvError> {
    tlv::encode(TLV_TYPE_PIXELS_SET_COLOR, &color.to_bytes())
}

/// Encode a pixels-set-indexed-color record
pub fn encode_set_indexed_color(
    index: u8,
    color: Rgb,
) -> core::result::Result<Vec<u8>, TlvError> {
    let mut value = [0u8; 1 + RGB_LEN];
    value[0] = index;
    value[1..].copy_from_slice(&color.to_bytes());
    tlv::encode(TLV_TYPE_PIXELS_SET_INDEXED_COLOR, &value)
}

/// Encode a pixels-set-five-colors record
pub fn encode_set_five_colors(
    colors: &[Rgb; STRIP_LEN],
) -> core::result::Result<Vec<u8>, TlvError> {
    let mut value = Vec::with_capacity(STRIP_LEN * RGB_LEN);
    for color in colors {
        value.extend_from_slice(&color.to_bytes());
    }
    tlv::encode(TLV_TYPE_PIXELS_SET_FIVE_COLORS, &value)
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

struct ClearCommand {
    strip: Rc<RefCell<dyn PixelStrip>>,
}

impl Command for ClearCommand {
    fn expected_length(&self) -> Option<u8> {
        Some(0)
    }

    fn apply(&mut self, _value: &[u8]) -> Result<()> {
        self.strip.borrow_mut().clear()
    }
}

struct SetColorCommand {
    strip: Rc<RefCell<dyn PixelStrip>>,
}

impl Command for SetColorCommand {
    fn expected_length(&self) -> Option<u8> {
        Some(RGB_LEN as u8)
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        let color = Rgb::from_bytes_at(value, 0)?;
        self.strip.borrow_mut().set_color(color)
    }
}

struct SetIndexedColorCommand {
    strip: Rc<RefCell<dyn PixelStrip>>,
}

impl Command for SetIndexedColorCommand {
    fn expected_length(&self) -> Option<u8> {
        Some(1 + RGB_LEN as u8)
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        if value.is_empty() {
            return Err(CommandError::ValueTooShort {
                expected: 1 + RGB_LEN,
                actual: 0,
            }
            .into());
        }
        let index = value[0];
        let color = Rgb::from_bytes_at(value, 1)?;
        self.strip.borrow_mut().set_indexed_color(index, color)
    }
}

struct SetFiveColorsCommand {
    strip: Rc<RefCell<dyn PixelStrip>>,
}

impl Command for SetFiveColorsCommand {
    fn expected_length(&self) -> Option<u8> {
        Some((STRIP_LEN * RGB_LEN) as u8)
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        let mut strip = self.strip.borrow_mut();
        for i in 0..STRIP_LEN {
            let color = Rgb::from_bytes_at(value, i * RGB_LEN)?;
            strip.set_indexed_color(i as u8, color)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Registration
// ----------------------------------------------------------------------------

/// Register all pixel commands against one shared strip
pub fn register_commands(table: &mut DispatchTable, strip: Rc<RefCell<dyn PixelStrip>>) {
    table.register(
        TLV_TYPE_PIXELS_CLEAR,
        Box::new(ClearCommand {
            strip: strip.clone(),
        }),
    );
    table.register(
        TLV_TYPE_PIXELS_SET_COLOR,
        Box::new(SetColorCommand {
            strip: strip.clone(),
        }),
    );
    table.register(
        TLV_TYPE_PIXELS_SET_INDEXED_COLOR,
        Box::new(SetIndexedColorCommand {
            strip: strip.clone(),
        }),
    );
    table.register(
        TLV_TYPE_PIXELS_SET_FIVE_COLORS,
        Box::new(SetFiveColorsCommand { strip }),
    );
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchPolicy;
    use crate::errors::BlinkcastError;
    use alloc::vec;

    #[derive(Default)]
    struct RecordingStrip {
        cleared: usize,
        all_set: Vec<Rgb>,
        indexed: Vec<(u8, Rgb)>,
    }

    impl PixelStrip for RecordingStrip {
        fn clear(&mut self) -> Result<()> {
            self.cleared += 1;
            Ok(())
        }

        fn set_color(&mut self, color: Rgb) -> Result<()> {
            self.all_set.push(color);
            Ok(())
        }

        fn set_indexed_color(&mut self, index: u8, color: Rgb) -> Result<()> {
            self.indexed.push((index, color));
            Ok(())
        }
    }

    fn table_with_strip() -> (DispatchTable, Rc<RefCell<RecordingStrip>>) {
        let strip = Rc::new(RefCell::new(RecordingStrip::default()));
        let mut table = DispatchTable::new();
        register_commands(&mut table, strip.clone());
        (table, strip)
    }

    #[test]
    fn test_rgb_codec() {
        let color = Rgb::new(70, 1, 155);
        assert_eq!(color.to_bytes(), [70, 1, 155]);
        assert_eq!(Rgb::from_bytes_at(&[70, 1, 155], 0).unwrap(), color);
        assert_eq!(Rgb::from_bytes_at(&[9, 70, 1, 155], 1).unwrap(), color);
    }

    #[test]
    fn test_rgb_from_short_bytes_fails() {
        assert_eq!(
            Rgb::from_bytes_at(&[1, 2], 0).unwrap_err(),
            CommandError::ValueTooShort {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_clear_roundtrip() {
        let (mut table, strip) = table_with_strip();
        let stream = encode_clear().unwrap();
        let records = tlv::decode(&stream).unwrap();
        table.apply_all(&records, DispatchPolicy::default()).unwrap();
        assert_eq!(strip.borrow().cleared, 1);
    }

    #[test]
    fn test_set_color_roundtrip() {
        let (mut table, strip) = table_with_strip();
        let stream = encode_set_color(Rgb::new(0x64, 0x64, 0x64)).unwrap();
        let records = tlv::decode(&stream).unwrap();
        table.apply_all(&records, DispatchPolicy::default()).unwrap();
        assert_eq!(strip.borrow().all_set, vec![Rgb::new(0x64, 0x64, 0x64)]);
    }

    #[test]
    fn test_set_indexed_color_roundtrip() {
        let (mut table, strip) = table_with_strip();
        let stream = encode_set_indexed_color(2, Rgb::new(0, 126, 254)).unwrap();
        let records = tlv::decode(&stream).unwrap();
        table.apply_all(&records, DispatchPolicy::default()).unwrap();
        assert_eq!(strip.borrow().indexed, vec![(2, Rgb::new(0, 126, 254))]);
    }

    #[test]
    fn test_set_five_colors_addresses_each_pixel() {
        let (mut table, strip) = table_with_strip();
        let colors = [
            Rgb::new(70, 1, 155),
            Rgb::new(0, 126, 254),
            Rgb::new(0, 187, 0),
            Rgb::new(254, 246, 1),
            Rgb::new(221, 0, 0),
        ];
        let stream = encode_set_five_colors(&colors).unwrap();
        let records = tlv::decode(&stream).unwrap();
        table.apply_all(&records, DispatchPolicy::default()).unwrap();

        let strip = strip.borrow();
        assert_eq!(strip.indexed.len(), STRIP_LEN);
        for (i, color) in colors.iter().enumerate() {
            assert_eq!(strip.indexed[i], (i as u8, *color));
        }
    }

    #[test]
    fn test_wrong_declared_length_rejected_before_handler() {
        let (mut table, strip) = table_with_strip();
        let record = tlv::TlvRecord::new(TLV_TYPE_PIXELS_SET_COLOR, 2, vec![1, 2]);
        let err = table.apply(&record, DispatchPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            BlinkcastError::Tlv(TlvError::MalformedRecord { .. })
        ));
        assert!(strip.borrow().all_set.is_empty());
    }

    #[test]
    fn test_short_value_with_matching_declared_length_fails_in_handler() {
        // A lenient decode can hand over a record whose declared length
        // matches but whose value went missing; the handler must not index
        // out of bounds.
        let (mut table, _strip) = table_with_strip();
        let record = tlv::TlvRecord::new(TLV_TYPE_PIXELS_SET_COLOR, 3, Vec::new());
        let err = table.apply(&record, DispatchPolicy::default()).unwrap_err();
        assert!(matches!(err, BlinkcastError::Command(_)));
    }
}
