//! Outbound probe commands and their exact wire encoding.
//!
//! Every command is a short ASCII string terminated by a carriage return.
//! Numeric arguments are formatted with a fixed number of fractional
//! digits through `core::fmt`, which is locale-independent.
//!
//! | Command                 | Wire form              |
//! |-------------------------|------------------------|
//! | `DisableAck`            | `*OK,0\r`              |
//! | `ContinuousMode`        | `C,1\r`                |
//! | `ClearCalibration`      | `Cal,clear\r`          |
//! | `SlopeQuery`            | `Slope,?\r`            |
//! | `Calibrate(Mid, v)`     | `Cal,mid,<v:.3>\r`     |
//! | `Calibrate(Low, v)`     | `Cal,low,<v:.3>\r`     |
//! | `Calibrate(High, v)`    | `Cal,high,<v:.3>\r`    |
//! | `TemperatureCompensation(t)` | `T,<t:.2>\r`, or `T,20\r` outside (0, 100) |

use core::fmt::Write;

use crate::error::ProbeError;

/// Line terminator used in both directions.
pub const TERMINATOR: u8 = b'\r';

/// Capacity of an encoded command.  Large enough for any value a keypad
/// can produce; absurd magnitudes are rejected with `CommandTooLong`.
pub const COMMAND_CAPACITY: usize = 48;

/// Compensation temperature substituted for invalid input (°C).
pub const DEFAULT_COMPENSATION_C: u8 = 20;

/// An encoded command, ready to write to the transport.
pub type CommandBuf = heapless::String<COMMAND_CAPACITY>;

/// Calibration point understood by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPoint {
    Mid,
    Low,
    High,
}

impl CalibrationPoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mid => "mid",
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Every command this layer sends to the probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeCommand {
    /// Turn off the `*OK` acknowledgement after each command.
    DisableAck,
    /// Continuous mode: one unsolicited reading per second.
    ContinuousMode,
    /// Erase all stored calibration points.
    ClearCalibration,
    /// Ask for the calibration slope (`?Slope,...` answer).
    SlopeQuery,
    /// Store a calibration point at the given pH.
    Calibrate(CalibrationPoint, f64),
    /// Set the temperature used for compensation (°C).
    TemperatureCompensation(f64),
}

impl ProbeCommand {
    /// Encode into the exact byte sequence the probe expects.
    pub fn encode(&self) -> Result<CommandBuf, ProbeError> {
        let mut out = CommandBuf::new();
        let res = match *self {
            Self::DisableAck => out.write_str("*OK,0\r"),
            Self::ContinuousMode => out.write_str("C,1\r"),
            Self::ClearCalibration => out.write_str("Cal,clear\r"),
            Self::SlopeQuery => out.write_str("Slope,?\r"),
            Self::Calibrate(point, value) => {
                write!(out, "Cal,{},{:.3}\r", point.as_str(), value)
            }
            Self::TemperatureCompensation(celsius) => {
                if is_valid_compensation(celsius) {
                    write!(out, "T,{:.2}\r", celsius)
                } else {
                    write!(out, "T,{}\r", DEFAULT_COMPENSATION_C)
                }
            }
        };
        res.map_err(|_| ProbeError::CommandTooLong)?;
        Ok(out)
    }
}

/// Open interval (0, 100) °C; NaN and infinities fail both comparisons.
pub fn is_valid_compensation(celsius: f64) -> bool {
    celsius > 0.0 && celsius < 100.0
}
