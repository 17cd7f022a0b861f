//! Core types for the blinkcast protocol
//!
//! This module defines the fundamental identifier types used throughout the
//! codec, using newtype patterns for semantic validation and type safety.

use core::fmt;

use alloc::vec::Vec;

// ----------------------------------------------------------------------------
// Company Identifier
// ----------------------------------------------------------------------------

/// Two-byte company identifier carried at the start of the manufacturer field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompanyId([u8; 2]);

impl CompanyId {
    /// Create a new CompanyId from 2 bytes
    pub fn new(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// Company id used by the reference deployment (vendor-reserved 0xFFFF)
    pub const TEST: Self = Self([0xFF, 0xFF]);
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ----------------------------------------------------------------------------
// Service Identifier
// ----------------------------------------------------------------------------

/// Service identifier carried in a complete-service-list advertising record
///
/// The wire width (2, 4, or 16 bytes) selects the record type the builder
/// emits. Multi-byte identifiers are little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Uuid16(u16),
    Uuid32(u32),
    Uuid128([u8; 16]),
}

impl ServiceId {
    /// Number of bytes this identifier occupies on the wire
    pub fn width(&self) -> usize {
        match self {
            ServiceId::Uuid16(_) => 2,
            ServiceId::Uuid32(_) => 4,
            ServiceId::Uuid128(_) => 16,
        }
    }

    /// Encode to little-endian wire bytes
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            ServiceId::Uuid16(id) => id.to_le_bytes().to_vec(),
            ServiceId::Uuid32(id) => id.to_le_bytes().to_vec(),
            ServiceId::Uuid128(id) => id.to_vec(),
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceId::Uuid16(id) => write!(f, "{:04x}", id),
            ServiceId::Uuid32(id) => write!(f, "{:08x}", id),
            ServiceId::Uuid128(id) => write!(f, "{}", hex::encode(id)),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_id_display() {
        assert_eq!(CompanyId::new([0xFF, 0xFF]).to_string(), "ffff");
        assert_eq!(CompanyId::new([0x4C, 0x00]).to_string(), "4c00");
    }

    #[test]
    fn test_service_id_widths() {
        assert_eq!(ServiceId::Uuid16(0x181A).width(), 2);
        assert_eq!(ServiceId::Uuid32(0xDEADBEEF).width(), 4);
        assert_eq!(ServiceId::Uuid128([0; 16]).width(), 16);
    }

    #[test]
    fn test_service_id_little_endian() {
        assert_eq!(ServiceId::Uuid16(0x181A).to_le_bytes(), [0x1A, 0x18]);
        assert_eq!(
            ServiceId::Uuid32(0xDEADBEEF_u32).to_le_bytes(),
            [0xEF, 0xBE, 0xAD, 0xDE]
        );
    }
}
