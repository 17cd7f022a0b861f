//! Decode and dispatch policy configuration
//!
//! The two reference decoders for this protocol family disagree on how to
//! treat bytes left over after the TLV scan loop: one rejects the stream,
//! the other logs and drops the trailer. Both behaviors are exposed here as
//! explicit policies; strict is canonical and the default.

// ----------------------------------------------------------------------------
// TLV Trailer Policy
// ----------------------------------------------------------------------------

/// How `tlv::decode_with` treats trailing bytes that do not form a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailerPolicy {
    /// Reject the stream with `TlvError::TrailingBytes` (stray trailer) or
    /// `TlvError::TruncatedValue` (final value shorter than declared)
    #[default]
    Strict,
    /// Log a warning and drop the trailer, keeping the complete records
    Lenient,
}

// ----------------------------------------------------------------------------
// Dispatch Policy
// ----------------------------------------------------------------------------

/// How the dispatcher treats record types with no registered handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// When true, records of unregistered types are no-ops; when false they
    /// fail with `TlvError::UnknownType`
    pub skip_unknown: bool,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self { skip_unknown: true }
    }
}

impl DispatchPolicy {
    /// Policy that rejects records of unregistered types
    pub fn strict() -> Self {
        Self {
            skip_unknown: false,
        }
    }
}
