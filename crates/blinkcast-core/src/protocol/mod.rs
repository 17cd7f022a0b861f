//! blinkcast protocol module
//!
//! This module contains the layered codec and dispatch core:
//! - `advertising`: length-type-value advertising records, payload builder
//!   and scanner (31-byte budget)
//! - `tlv`: type-length-value command records multiplexed inside the
//!   manufacturer field
//! - `dispatch`: mapping from command type to validated handlers

pub mod advertising;
pub mod dispatch;
pub mod tlv;

// Re-export advertising types
pub use advertising::{Advertisement, ManufacturerField, MAX_PAYLOAD_LEN};

// Re-export TLV types
pub use tlv::TlvRecord;

// Re-export dispatch types
pub use dispatch::{Command, DispatchTable, FnCommand};
