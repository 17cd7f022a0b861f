//! Command dispatch for decoded TLV records
//!
//! Capability modules register one [`Command`] per record type into a
//! [`DispatchTable`] during startup; the table is read-only during dispatch.
//! Applying a record validates the declared length against the command's
//! expectation before the handler ever runs, and handler failures propagate
//! to the caller unswallowed. `apply_all` is fail-fast: the first failure
//! stops the stream.

use alloc::boxed::Box;

use hashbrown::HashMap;

use crate::config::DispatchPolicy;
use crate::errors::{Result, TlvError};
use crate::protocol::tlv::TlvRecord;

// ----------------------------------------------------------------------------
// Command Trait
// ----------------------------------------------------------------------------

/// One dispatchable operation: a declared value length plus the handler
///
/// Handlers run synchronously on the dispatch path and must be effectively
/// non-blocking; the radio side of the system is interrupt-driven and will
/// not wait for them.
pub trait Command {
    /// The exact declared length this command accepts; `None` accepts any
    fn expected_length(&self) -> Option<u8>;

    /// Apply the record value to the underlying actuator
    fn apply(&mut self, value: &[u8]) -> Result<()>;
}

/// Adapter turning a closure into a [`Command`]
///
/// Mirrors plain callback registration for tests and one-off handlers; the
/// capability modules use dedicated `Command` types instead.
pub struct FnCommand<F> {
    expected_length: Option<u8>,
    f: F,
}

impl<F> FnCommand<F>
where
    F: FnMut(&[u8]) -> Result<()>,
{
    /// Wrap a closure with an optional expected length
    pub fn new(expected_length: Option<u8>, f: F) -> Self {
        Self { expected_length, f }
    }
}

impl<F> Command for FnCommand<F>
where
    F: FnMut(&[u8]) -> Result<()>,
{
    fn expected_length(&self) -> Option<u8> {
        self.expected_length
    }

    fn apply(&mut self, value: &[u8]) -> Result<()> {
        (self.f)(value)
    }
}

// ----------------------------------------------------------------------------
// Dispatch Table
// ----------------------------------------------------------------------------

/// Mapping from record type to its registered command
#[derive(Default)]
pub struct DispatchTable {
    entries: HashMap<u8, Box<dyn Command>>,
}

impl DispatchTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command for a record type; re-registering overwrites
    pub fn register(&mut self, tlv_type: u8, command: Box<dyn Command>) {
        if self.entries.insert(tlv_type, command).is_some() {
            log::debug!("replacing registered command for type {}", tlv_type);
        }
    }

    /// True when a command is registered for the type
    pub fn is_registered(&self, tlv_type: u8) -> bool {
        self.entries.contains_key(&tlv_type)
    }

    /// Number of registered record types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no command has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply one decoded record against the table
    pub fn apply(&mut self, record: &TlvRecord, policy: DispatchPolicy) -> Result<()> {
        log::debug!(
            "applying tlv type={} declared_length={} value={}",
            record.tlv_type,
            record.declared_length,
            hex::encode(&record.value),
        );

        let Some(command) = self.entries.get_mut(&record.tlv_type) else {
            if policy.skip_unknown {
                log::debug!("skipping unknown tlv type {}", record.tlv_type);
                return Ok(());
            }
            return Err(TlvError::UnknownType {
                tlv_type: record.tlv_type,
            }
            .into());
        };

        if let Some(expected) = command.expected_length() {
            if record.declared_length != expected {
                return Err(TlvError::MalformedRecord {
                    tlv_type: record.tlv_type,
                    expected,
                    actual: record.declared_length,
                }
                .into());
            }
        }

        command.apply(&record.value)
    }

    /// Apply records in stream order, stopping at the first failure
    pub fn apply_all(&mut self, records: &[TlvRecord], policy: DispatchPolicy) -> Result<()> {
        for record in records {
            self.apply(record, policy)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
