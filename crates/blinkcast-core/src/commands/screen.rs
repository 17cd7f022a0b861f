//! Display commands
//!
//! Value formats:
//! - clear: empty
//! - fill-color: RGB565 color as a big-endian u16
//! - text: UTF-8 bytes, variable length

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::commands::{TLV_TYPE_SCREEN_CLEAR, TLV_TYPE_SCREEN_FILL_COLOR, TLV_TYPE_SCREEN_TEXT};
use crate::errors::{CommandError, Result, TlvError};
use crate::protocol::dispatch::{Command, DispatchTable};
use crate::protocol::tlv;

/// Bytes in an encoded fill color
pub const COLOR_LEN: usize = 2;

// ----------------------------------------------------------------------------
// RGB565 Palette
// ----------------------------------------------------------------------------

pub const COLOR_BLACK: u16 = 0x0000;
pub const COLOR_BLUE: u16 = 0x001F;
pub const COLOR_RED: u16 = 0xF800;
pub const COLOR_GREEN: u16 = 0x07E0;
pub const COLOR_CYAN: u16 = 0x07FF;
pub const COLOR_MAGENTA: u16 = 0xF81F;
pub const COLOR_YELLOW: u16 = 0xFFE0;
pub const COLOR_WHITE: u16 = 0xFFFF;

// ----------------------------------------------------------------------------
// Color Codec
// ----------------------------------------------------------------------------

/// Encode an RGB565 color to wire bytes (big-endian)
pub fn color_to_bytes(color: u16) -> [u8; COLOR_LEN] {
    color.to_be_bytes()
}

/// Decode an RGB565 color from wire bytes
pub fn color_from_bytes(value: &[u8]) -> core::result::Result<u16, CommandError> {
    let bytes = <[u8; COLOR_LEN]>::try_from(value).map_err(|_| CommandError::ValueTooShort {
        expected: COLOR_LEN,
        actual: value.len(),
    })?;
    Ok(u16::from_be_bytes(bytes))
}

// ----------------------------------------------------------------------------
// Actuator Trait
// ----------------------------------------------------------------------------

/// External display driver the handlers act on
pub trait Screen {
    /// Blank the display
    fn clear(&mut self) -> Result<()>;

    /// Fill the display with one RGB565 color
    fn fill(&mut self, color: u16) -> Result<()>;

    /// Write a line of text
    fn text(&mut self, text: &str) -> Result<()>;
}

// ----------------------------------------------------------------------------
// Value Encoders
// ----------------------------------------------------------------------------

/// Encode a screen-clear record
pub fn encode_clear() -> core::result::Result<Vec<u8>, TlvError> {
    tlv::encode(TLV_TYPE_SCREEN_CLEAR, &[])
}

/// Encode a screen-fill-color record
pub fn encode_fill(color: u16) -> core::result::Result<Vec<u8>, TlvError> {
    tlv::encode(TLV_TYPE_SCREEN_FILL_COLOR, &color_to_bytes(color))
}

/// Encode a screen-text record
pub fn encode_text(text: &str) -> core::result::Result<Vec<u8>, TlvError> {
    tlv::encode(TLV_TYPE_SCREEN_TEXT, text.as_bytes())
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

struct ClearCommand {
    screen: Rc<RefCell<dyn Screen>>,
}

impl Command for ClearCommand {
    fn expected_length(&self) -> Option<u8> {
        Some(0)
    }

    fn apply(&mut self, _value: &[u8]) -> Result<()> {
        self.screen.borrow_mut().clear()
    }
}

struct FillColorCommand {
    screen: Rc<RefCell<dyn Screen>>,
}

impl Command for FillColorCommand {
    fn expected_length(&self) -> Option<u8> {
        Some(COLOR_LEN as u8)
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        let color = color_from_bytes(value)?;
        self.screen.borrow_mut().fill(color)
    }
}

struct TextCommand {
    screen: Rc<RefCell<dyn Screen>>,
}

impl Command for TextCommand {
    // Text is the one variable-length command in the protocol.
    fn expected_length(&self) -> Option<u8> {
        None
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        let text = core::str::from_utf8(value).map_err(|_| CommandError::InvalidText)?;
        self.screen.borrow_mut().text(text)
    }
}

// ----------------------------------------------------------------------------
// Registration
// ----------------------------------------------------------------------------

/// Register all screen commands against one shared display
pub fn register_commands(table: &mut DispatchTable, screen: Rc<RefCell<dyn Screen>>) {
    table.register(
        TLV_TYPE_SCREEN_CLEAR,
        Box::new(ClearCommand {
            screen: screen.clone(),
        }),
    );
    table.register(
        TLV_TYPE_SCREEN_FILL_COLOR,
        Box::new(FillColorCommand {
            screen: screen.clone(),
        }),
    );
    table.register(TLV_TYPE_SCREEN_TEXT, Box::new(TextCommand { screen }));
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
