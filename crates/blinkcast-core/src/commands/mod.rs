//! Capability command modules
//!
//! Each module owns the wire format and handlers for one piece of hardware:
//! - `pixels`: LED strip commands (types 0–3)
//! - `screen`: display commands (types 10–12)
//! - `buzzer`: tone commands (types 20–21)
//!
//! Actuators are external collaborators expressed as traits; each module
//! exposes a `register_commands` call that adds its `(type, expected length,
//! handler)` triples to a [`DispatchTable`](crate::protocol::DispatchTable)
//! at startup. The codec core never hardcodes these types anywhere else.

pub mod buzzer;
pub mod pixels;
pub mod screen;

// ----------------------------------------------------------------------------
// Command Type Constants
// ----------------------------------------------------------------------------

pub const TLV_TYPE_PIXELS_CLEAR: u8 = 0;
pub const TLV_TYPE_PIXELS_SET_COLOR: u8 = 1;
pub const TLV_TYPE_PIXELS_SET_INDEXED_COLOR: u8 = 2;
pub const TLV_TYPE_PIXELS_SET_FIVE_COLORS: u8 = 3;

pub const TLV_TYPE_SCREEN_CLEAR: u8 = 10;
pub const TLV_TYPE_SCREEN_FILL_COLOR: u8 = 11;
pub const TLV_TYPE_SCREEN_TEXT: u8 = 12;

pub const TLV_TYPE_BUZZER_NOTE: u8 = 20;
pub const TLV_TYPE_BUZZER_SONG: u8 = 21;

// Re-export actuator traits and value types
pub use buzzer::{Buzzer, Note, Song};
pub use pixels::{PixelStrip, Rgb};
pub use screen::Screen;
