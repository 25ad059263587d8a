//! Unified error types for the tank controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! main loop's error handling uniform.  All variants are `Copy` so they can
//! be logged and passed around without allocation.
//!
//! The probe layer itself never escalates: its fire-and-forget operations
//! log a [`ProbeError`] and carry on with stale data.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Communication with the pH probe failed.
    Probe(ProbeError),
    /// Configuration is invalid or could not be loaded or stored.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe(e) => write!(f, "probe: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Probe errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// The transport rejected a write.
    TransportWrite,
    /// The transport accepted only part of a command.
    ShortWrite { written: usize, expected: usize },
    /// The transport reported a read failure while draining.
    TransportRead,
    /// A command did not fit the fixed-size command buffer.
    CommandTooLong,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportWrite => write!(f, "transport write failed"),
            Self::ShortWrite { written, expected } => {
                write!(f, "short write ({written} of {expected} bytes)")
            }
            Self::TransportRead => write!(f, "transport read failed"),
            Self::CommandTooLong => write!(f, "command exceeds buffer"),
        }
    }
}

impl From<ProbeError> for Error {
    fn from(e: ProbeError) -> Self {
        Self::Probe(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("stored config corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::IoError => Self::Config("storage I/O error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
