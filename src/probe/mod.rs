//! pH probe subsystem: wire protocol plus the driver that owns the UART.
//!
//! ```text
//!  ┌──────────────┐   ┌──────────┐   ┌──────────────────────┐
//!  │  Transport   │──▶│  parser  │──▶│  PhProbe (driver)    │
//!  │  (UART1)     │◀──│ command  │◀──│  reading · slope     │
//!  └──────────────┘   └──────────┘   └──────────────────────┘
//!                                             ▲
//!                                 PhCalibration (UI states)
//! ```

pub mod command;
pub mod driver;
pub mod parser;
pub mod slope;

pub use command::{CalibrationPoint, ProbeCommand};
pub use driver::PhProbe;
pub use slope::SlopeReport;

/// Calibration operations the UI states are allowed to trigger.
///
/// The probe clears its stored lowpoint and highpoint whenever a new
/// midpoint is set, so every multi-point sequence sends the midpoint
/// first.  Values are not range-checked here; the numeric-entry UI is
/// trusted.
pub trait PhCalibration {
    /// Erase all stored calibration points.
    fn clear_calibration(&mut self);

    /// Set the midpoint only.
    fn one_point_calibration(&mut self, midpoint: f64);

    /// Midpoint, then lowpoint.
    fn two_point_calibration(&mut self, lowpoint: f64, midpoint: f64);

    /// Midpoint, then lowpoint, then highpoint.
    fn three_point_calibration(&mut self, lowpoint: f64, midpoint: f64, highpoint: f64);

    /// Lowpoint only; the stored midpoint is kept.
    fn low_point_calibration(&mut self, lowpoint: f64);

    /// Highpoint only; the stored midpoint is kept.
    fn high_point_calibration(&mut self, highpoint: f64);
}
