//! Error types for the blinkcast protocol
//!
//! This module contains all error types used throughout the codec and dispatch
//! core: advertising payload errors, TLV codec errors, command handler errors,
//! and the main BlinkcastError type that unifies them all.

// ----------------------------------------------------------------------------
// Specific Error Types
// ----------------------------------------------------------------------------

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Advertising payload assembly errors
        #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
        pub enum AdvertisingError {
            #[error("Advertising payload too large (max {max}, got {actual})")]
            PayloadTooLarge { max: usize, actual: usize },
        }
    } else {
        /// Advertising payload assembly errors (no_std version)
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum AdvertisingError {
            PayloadTooLarge { max: usize, actual: usize },
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// TLV codec and dispatch validation errors
        #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
        pub enum TlvError {
            #[error("TLV value too large for one-byte length field (got {actual} bytes)")]
            LengthOverflow { actual: usize },
            #[error("Trailing bytes do not form a complete TLV record ({remaining} remaining)")]
            TrailingBytes { remaining: usize },
            #[error("Final TLV record's value is truncated ({missing} bytes missing)")]
            TruncatedValue { missing: usize },
            #[error("Malformed record for type {tlv_type}: expected length {expected}, got {actual}")]
            MalformedRecord { tlv_type: u8, expected: u8, actual: u8 },
            #[error("Unknown TLV type: {tlv_type}")]
            UnknownType { tlv_type: u8 },
        }
    } else {
        /// TLV codec and dispatch validation errors (no_std version)
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum TlvError {
            LengthOverflow { actual: usize },
            TrailingBytes { remaining: usize },
            TruncatedValue { missing: usize },
            MalformedRecord { tlv_type: u8, expected: u8, actual: u8 },
            UnknownType { tlv_type: u8 },
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Errors raised inside command handlers while decoding values
        #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
        pub enum CommandError {
            #[error("Command value too short (expected at least {expected}, got {actual})")]
            ValueTooShort { expected: usize, actual: usize },
            #[error("Unknown song id: {song_id}")]
            UnknownSong { song_id: u8 },
            #[error("Screen text is not valid UTF-8")]
            InvalidText,
        }
    } else {
        /// Errors raised inside command handlers while decoding values (no_std version)
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum CommandError {
            ValueTooShort { expected: usize, actual: usize },
            UnknownSong { song_id: u8 },
            InvalidText,
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Core error type for the blinkcast protocol
        #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
        pub enum BlinkcastError {
            #[error("Advertising error: {0}")]
            Advertising(#[from] AdvertisingError),

            #[error("TLV error: {0}")]
            Tlv(#[from] TlvError),

            #[error("Command error: {0}")]
            Command(#[from] CommandError),
        }
    } else {
        /// Core error type for the blinkcast protocol (no_std version)
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum BlinkcastError {
            Advertising(AdvertisingError),
            Tlv(TlvError),
            Command(CommandError),
        }

        impl From<AdvertisingError> for BlinkcastError {
            fn from(err: AdvertisingError) -> Self {
                BlinkcastError::Advertising(err)
            }
        }

        impl From<TlvError> for BlinkcastError {
            fn from(err: TlvError) -> Self {
                BlinkcastError::Tlv(err)
            }
        }

        impl From<CommandError> for BlinkcastError {
            fn from(err: CommandError) -> Self {
                BlinkcastError::Command(err)
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Type Aliases
// ----------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, BlinkcastError>;
