//! Logging actuators
//!
//! Stand-ins for real hardware: each one implements a core actuator trait
//! and reports what it would have done through tracing. `apply` wires these
//! into a dispatch table so decoded command streams can be exercised on a
//! machine with no LEDs, screen, or buzzer attached.

use tracing::info;

use blinkcast_core::commands::{Buzzer, Note, PixelStrip, Rgb, Screen, Song};
use blinkcast_core::Result;

pub struct LogPixels;

impl PixelStrip for LogPixels {
    fn clear(&mut self) -> Result<()> {
        info!("pixels: clear");
        Ok(())
    }

    fn set_color(&mut self, color: Rgb) -> Result<()> {
        info!("pixels: all leds -> #{:02x}{:02x}{:02x}", color.r, color.g, color.b);
        Ok(())
    }

    fn set_indexed_color(&mut self, index: u8, color: Rgb) -> Result<()> {
        info!(
            "pixels: led {} -> #{:02x}{:02x}{:02x}",
            index, color.r, color.g, color.b
        );
        Ok(())
    }
}

pub struct LogScreen;

impl Screen for LogScreen {
    fn clear(&mut self) -> Result<()> {
        info!("screen: clear");
        Ok(())
    }

    fn fill(&mut self, color: u16) -> Result<()> {
        info!("screen: fill 0x{:04x}", color);
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        info!("screen: text {:?}", text);
        Ok(())
    }
}

pub struct LogBuzzer;

impl Buzzer for LogBuzzer {
    fn note(&mut self, note: Note) -> Result<()> {
        info!(
            "buzzer: note {} hz for {} ms, rest {} ms",
            note.frequency_hz, note.duration_ms, note.rest_ms
        );
        Ok(())
    }

    fn song(&mut self, song: Song) -> Result<()> {
        info!("buzzer: song {}", song.id());
        Ok(())
    }
}
