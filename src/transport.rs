//! Transport abstraction: any byte-oriented channel to the probe.
//!
//! Concrete implementations:
//! - UART1 on the ESP32-S3 (production, see [`crate::adapters::uart`])
//! - in-memory simulated UART (host tests)
//!
//! The probe driver is generic over `Transport`, so the protocol logic
//! never touches a peripheral directly.

/// Byte-oriented, non-blocking transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if data is available for reading.
    fn available(&self) -> bool;
}
