//! Command-line interface definitions and parsing

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an advertising payload and print it as hex
    Build {
        /// Device name to advertise
        #[arg(short, long)]
        name: Option<String>,

        /// Service UUID in hex (4, 8, or 32 digits), repeatable
        #[arg(short, long)]
        service: Vec<String>,

        /// Company identifier for the manufacturer field (4 hex digits)
        #[arg(short, long, default_value = "ffff")]
        company_id: String,

        /// Advertise as limited-discoverable
        #[arg(long)]
        limited: bool,

        /// Advertise BR/EDR support
        #[arg(long)]
        br_edr: bool,

        #[command(subcommand)]
        command: HardwareCommand,
    },
    /// Parse a hex payload and print its records
    Inspect {
        /// Advertising payload as hex
        payload: String,

        /// Tolerate trailing bytes after the last complete record
        #[arg(long)]
        lenient: bool,
    },
    /// Parse a hex payload and run its command stream against logging actuators
    Apply {
        /// Advertising payload as hex
        payload: String,

        /// Only apply streams carrying this company identifier (4 hex digits)
        #[arg(short, long, default_value = "ffff")]
        company_id: String,

        /// Tolerate trailing bytes after the last complete record
        #[arg(long)]
        lenient: bool,

        /// Fail on command types with no registered handler
        #[arg(long)]
        strict_unknown: bool,
    },
}

#[derive(Subcommand)]
pub enum HardwareCommand {
    /// Turn off every LED
    PixelsClear,
    /// Set every LED to one color
    PixelsSetColor {
        /// Color as RRGGBB hex
        color: String,
    },
    /// Set a single LED by index
    PixelsSetIndexedColor {
        /// LED index
        index: u8,
        /// Color as RRGGBB hex
        color: String,
    },
    /// Set five LEDs at once
    PixelsSetFiveColors {
        /// Five colors as RRGGBB hex
        #[arg(num_args = 5)]
        colors: Vec<String>,
    },
    /// Clear the screen
    ScreenClear,
    /// Fill the screen with one color
    ScreenFill {
        /// RGB565 color as 4 hex digits
        color: String,
    },
    /// Show a line of text on the screen
    ScreenText {
        /// Text to display
        text: String,
    },
    /// Play a single note
    BuzzerNote {
        /// Frequency in hertz
        frequency: f32,
        /// Note duration in milliseconds
        duration_ms: u16,
        /// Rest after the note in milliseconds
        rest_ms: u16,
    },
    /// Play a built-in song
    BuzzerSong {
        /// Song id (1 = r2d2, 2 = star wars, 3 = reload, 4 = ringtone)
        song_id: u8,
    },
}
