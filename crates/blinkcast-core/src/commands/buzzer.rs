//! Tone commands
//!
//! Value formats:
//! - note: big-endian f32 frequency in Hz, u16 duration in ms, u16 rest in ms
//! - song: one-byte song id

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::commands::{TLV_TYPE_BUZZER_NOTE, TLV_TYPE_BUZZER_SONG};
use crate::errors::{CommandError, Result, TlvError};
use crate::protocol::dispatch::{Command, DispatchTable};
use crate::protocol::tlv;

/// Bytes in an encoded note
pub const NOTE_LEN: usize = 8;

// ----------------------------------------------------------------------------
// Note Codec
// ----------------------------------------------------------------------------

/// One tone: frequency plus on/off durations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency_hz: f32,
    pub duration_ms: u16,
    pub rest_ms: u16,
}

impl Note {
    /// Create a new note
    pub fn new(frequency_hz: f32, duration_ms: u16, rest_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            rest_ms,
        }
    }

    /// Encode to wire bytes (big-endian f32, u16, u16)
    pub fn to_bytes(self) -> [u8; NOTE_LEN] {
        let mut bytes = [0u8; NOTE_LEN];
        bytes[0..4].copy_from_slice(&self.frequency_hz.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.duration_ms.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.rest_ms.to_be_bytes());
        bytes
    }

    /// Decode from wire bytes
    pub fn from_bytes(value: &[u8]) -> core::result::Result<Self, CommandError> {
        let bytes = <[u8; NOTE_LEN]>::try_from(value).map_err(|_| CommandError::ValueTooShort {
            expected: NOTE_LEN,
            actual: value.len(),
        })?;

        let frequency_hz = f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let duration_ms = u16::from_be_bytes([bytes[4], bytes[5]]);
        let rest_ms = u16::from_be_bytes([bytes[6], bytes[7]]);
        Ok(Self::new(frequency_hz, duration_ms, rest_ms))
    }
}

// ----------------------------------------------------------------------------
// Songs
// ----------------------------------------------------------------------------

/// Built-in song identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Song {
    R2d2 = 1,
    StarWars = 2,
    Reload = 3,
    Ringtone = 4,
}

impl Song {
    /// Decode a song id from the wire
    pub fn from_id(song_id: u8) -> core::result::Result<Self, CommandError> {
        match song_id {
            1 => Ok(Song::R2d2),
            2 => Ok(Song::StarWars),
            3 => Ok(Song::Reload),
            4 => Ok(Song::Ringtone),
            _ => Err(CommandError::UnknownSong { song_id }),
        }
    }

    /// The wire id of this song
    pub fn id(self) -> u8 {
        self as u8
    }
}

// ----------------------------------------------------------------------------
// Actuator Trait
// ----------------------------------------------------------------------------

/// External tone generator the handlers act on
pub trait Buzzer {
    /// Play a single note
    fn note(&mut self, note: Note) -> Result<()>;

    /// Play a built-in song
    fn song(&mut self, song: Song) -> Result<()>;
}

// ----------------------------------------------------------------------------
// Value Encoders
// ----------------------------------------------------------------------------

/// Encode a buzzer-note record
pub fn encode_note(note: Note) -> core::result::Result<Vec<u8>, TlvError> {
    tlv::encode(TLV_TYPE_BUZZER_NOTE, &note.to_bytes())
}

/// Encode a buzzer-song record
pub fn encode_song(song: Song) -> core::result::Result<Vec<u8>, TlvError> {
    tlv::encode(TLV_TYPE_BUZZER_SONG, &[song.id()])
}

// ----------------------------------------------------------------------------
// Handlers
// ----------------------------------------------------------------------------

struct NoteCommand {
    buzzer: Rc<RefCell<dyn Buzzer>>,
}

impl Command for NoteCommand {
    fn expected_length(&self) -> Option<u8> {
        Some(NOTE_LEN as u8)
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        let note = Note::from_bytes(value)?;
        self.buzzer.borrow_mut().note(note)
    }
}

struct SongCommand {
    buzzer: Rc<RefCell<dyn Buzzer>>,
}

impl Command for SongCommand {
    fn expected_length(&self) -> Option<u8> {
        Some(1)
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        if value.is_empty() {
            return Err(CommandError::ValueTooShort {
                expected: 1,
                actual: 0,
            }
            .into());
        }
        let song = Song::from_id(value[0])?;
        self.buzzer.borrow_mut().song(song)
    }
}

// ----------------------------------------------------------------------------
// Registration
// ----------------------------------------------------------------------------

/// Register all buzzer commands against one shared tone generator
pub fn register_commands(table: &mut DispatchTable, buzzer: Rc<RefCell<dyn Buzzer>>) {
    table.register(
        TLV_TYPE_BUZZER_NOTE,
        Box::new(NoteCommand {
            buzzer: buzzer.clone(),
        }),
    );
    table.register(TLV_TYPE_BUZZER_SONG, Box::new(SongCommand { buzzer }));
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
    struct RecordingBuzzer {
        notes: Vec<Note>,
        songs: Vec<Song>,
    }

    impl Buzzer for RecordingBuzzer {
        fn note(&mut self, note: Note) -> Result<()> {
            self.notes.push(note);
            Ok(())
        }

        fn song(&mut self, song: Song) -> Result<()> {
            self.songs.push(song);
            Ok(())
        }
    }

    fn table_with_buzzer() -> (DispatchTable, Rc<RefCell<RecordingBuzzer>>) {
        let buzzer = Rc::new(RefCell::new(RecordingBuzzer::default()));
        let mut table = DispatchTable::new();
        register_commands(&mut table, buzzer.clone());
        (table, buzzer)
    }

    #[test]
    fn test_note_codec_roundtrip() {
        let note = Note::new(440.0, 100, 20);
        let bytes = note.to_bytes();
        assert_eq!(bytes.len(), NOTE_LEN);
        assert_eq!(Note::from_bytes(&bytes).unwrap(), note);
    }

    #[test]
    fn test_note_wire_layout_is_big_endian() {
        let note = Note::new(440.0, 0x0102, 0x0304);
        let bytes = note.to_bytes();
        assert_eq!(&bytes[0..4], &440.0_f32.to_be_bytes());
        assert_eq!(&bytes[4..6], &[0x01, 0x02]);
        assert_eq!(&bytes[6..8], &[0x03, 0x04]);
    }

    #[test]
    fn test_note_from_short_bytes_fails() {
        assert_eq!(
            Note::from_bytes(&[0; 4]).unwrap_err(),
            CommandError::ValueTooShort {
                expected: NOTE_LEN,
                actual: 4
            }
        );
    }

    #[test]
    fn test_song_ids() {
        assert_eq!(Song::from_id(1).unwrap(), Song::R2d2);
        assert_eq!(Song::from_id(4).unwrap(), Song::Ringtone);
        assert_eq!(Song::Reload.id(), 3);
        assert_eq!(
            Song::from_id(9).unwrap_err(),
            CommandError::UnknownSong { song_id: 9 }
        );
    }

    #[test]
    fn test_note_roundtrip_through_dispatch() {
        let (mut table, buzzer) = table_with_buzzer();
        let stream = encode_note(Note::new(293.66, 180, 40)).unwrap();
        let records = tlv::decode(&stream).unwrap();
        table.apply_all(&records, DispatchPolicy::default()).unwrap();
        assert_eq!(buzzer.borrow().notes, vec![Note::new(293.66, 180, 40)]);
    }

    #[test]
    fn test_song_roundtrip_through_dispatch() {
        let (mut table, buzzer) = table_with_buzzer();
        let stream = encode_song(Song::StarWars).unwrap();
        let records = tlv::decode(&stream).unwrap();
        table.apply_all(&records, DispatchPolicy::default()).unwrap();
        assert_eq!(buzzer.borrow().songs, vec![Song::StarWars]);
    }

    #[test]
    fn test_unknown_song_id_propagates() {
        let (mut table, buzzer) = table_with_buzzer();
        let record = tlv::TlvRecord::new(TLV_TYPE_BUZZER_SONG, 1, vec![0x63]);
        let err = table.apply(&record, DispatchPolicy::default()).unwrap_err();
        assert_eq!(
            err,
            BlinkcastError::Command(CommandError::UnknownSong { song_id: 0x63 })
        );
        assert!(buzzer.borrow().songs.is_empty());
    }
}
