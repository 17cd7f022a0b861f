//! blinkcast core protocol implementation
//!
//! This crate provides the layered codec and dispatch core for delivering
//! discrete hardware commands between untethered nodes over a connectionless
//! broadcast channel: an advertising-record codec packing optional fields
//! into a strict 31-byte budget, and a type-length-value command protocol
//! multiplexed inside the manufacturer-data sub-field.
//!
//! The protocol is fire-and-forget broadcast; there is no connection,
//! acknowledgment, or retransmission. Radio scan/advertise lifecycle and the
//! physical actuators are external collaborators: the former feeds raw
//! bytes in and out, the latter sit behind the traits in [`commands`].
//!
//! The crate is `no_std` compatible (with `alloc`) so the same codec runs on
//! the broadcasting and the receiving node.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod commands;
pub mod config;
pub mod errors;
pub mod protocol;
pub mod types;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use config::{DispatchPolicy, TrailerPolicy};
pub use errors::{AdvertisingError, BlinkcastError, CommandError, Result, TlvError};
pub use protocol::advertising::{Advertisement, ManufacturerField, MAX_PAYLOAD_LEN};
pub use protocol::dispatch::{Command, DispatchTable, FnCommand};
pub use protocol::tlv::TlvRecord;
pub use types::{CompanyId, ServiceId};
