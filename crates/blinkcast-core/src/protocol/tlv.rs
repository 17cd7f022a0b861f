//! TLV (type-length-value) command codec
//!
//! A command stream is a concatenation of `[type:u8][length:u8][value]`
//! records, carried as the opaque part of the advertising manufacturer field.
//!
//! Decoding is lenient about values and strict about trailers: a record whose
//! declared length reaches past the end of the stream still yields a record
//! (with an empty value), but the scan offset advances by the declared length
//! regardless, and any position mismatch left at the end of the scan rejects
//! the stream under [`TrailerPolicy::Strict`].

use alloc::vec::Vec;

use crate::config::TrailerPolicy;
use crate::errors::TlvError;

/// Size of the `(type, length)` record header
pub const TLV_HEADER_LEN: usize = 2;

/// Maximum value size representable by the one-byte length field
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

// ----------------------------------------------------------------------------
// Record
// ----------------------------------------------------------------------------

/// A single decoded TLV record
///
/// `value` is empty when the stream ended before the declared length was
/// reached, so a record is well-formed only when the two agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvRecord {
    pub tlv_type: u8,
    pub declared_length: u8,
    pub value: Vec<u8>,
}

impl TlvRecord {
    /// Create a new record
    pub fn new(tlv_type: u8, declared_length: u8, value: Vec<u8>) -> Self {
        Self {
            tlv_type,
            declared_length,
            value,
        }
    }

    /// True when the carried value matches the declared length
    pub fn is_well_formed(&self) -> bool {
        self.value.len() == self.declared_length as usize
    }
}

// ----------------------------------------------------------------------------
// Codec
// ----------------------------------------------------------------------------

/// Encode one record as `[type, len] ++ value`
///
/// Values longer than 255 bytes cannot be represented by the one-byte length
/// field and are rejected rather than truncated.
pub fn encode(tlv_type: u8, value: &[u8]) -> Result<Vec<u8>, TlvError> {
    if value.len() > MAX_VALUE_LEN {
        return Err(TlvError::LengthOverflow {
            actual: value.len(),
        });
    }

    let mut encoded = Vec::with_capacity(TLV_HEADER_LEN + value.len());
    encoded.push(tlv_type);
    encoded.push(value.len() as u8);
    encoded.extend_from_slice(value);
    Ok(encoded)
}

/// Decode a record stream with the canonical strict trailer policy
pub fn decode(bytes: &[u8]) -> Result<Vec<TlvRecord>, TlvError> {
    decode_with(bytes, TrailerPolicy::Strict)
}

/// Decode a record stream with an explicit trailer policy
pub fn decode_with(bytes: &[u8], policy: TrailerPolicy) -> Result<Vec<TlvRecord>, TlvError> {
    let mut records = Vec::new();
    let mut offset = 0usize;

    while offset + TLV_HEADER_LEN <= bytes.len() {
        let tlv_type = bytes[offset];
        let declared_length = bytes[offset + 1];
        let value_end = offset + TLV_HEADER_LEN + declared_length as usize;

        let value = if declared_length > 0 && value_end <= bytes.len() {
            bytes[offset + TLV_HEADER_LEN..value_end].to_vec()
        } else {
            Vec::new()
        };

        records.push(TlvRecord::new(tlv_type, declared_length, value));
        offset = value_end;
    }

    // The offset lands exactly on the stream end iff every record was
    // complete. A short final header leaves offset < len; a truncated final
    // value pushes offset past len.
    if offset != bytes.len() {
        match policy {
            TrailerPolicy::Strict => {
                return Err(if offset > bytes.len() {
                    TlvError::TruncatedValue {
                        missing: offset - bytes.len(),
                    }
                } else {
                    TlvError::TrailingBytes {
                        remaining: bytes.len() - offset,
                    }
                });
            }
            TrailerPolicy::Lenient => {
                if offset > bytes.len() {
                    log::warn!("dropping truncated record at end of TLV stream");
                    records.pop();
                } else {
                    log::warn!(
                        "ignoring {} trailing bytes that do not form a TLV record",
                        bytes.len() - offset
                    );
                }
            }
        }
    }

    Ok(records)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
