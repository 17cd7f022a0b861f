//! Blinkcast CLI library
//!
//! Host-side tooling for the Blinkcast broadcast command protocol: build
//! advertising payloads as hex, inspect received ones, and replay their
//! command streams against logging actuators.

pub mod actuators;
pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, HardwareCommand};
