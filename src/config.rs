//! System configuration parameters
//!
//! Tunable parameters for the tank controller.  Persisted as a postcard
//! blob through [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

/// Baud rates the probe's UART mode can be switched to.
pub const SUPPORTED_BAUD_RATES: [u32; 8] = [300, 1200, 2400, 9600, 19200, 38400, 57600, 115_200];

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Identity ---
    /// Tank number printed in every data-log row
    pub tank_id: u16,

    // --- pH control ---
    /// pH the control loop aims for
    pub target_ph: f32,
    /// PID gains for the CO2 solenoid loop (stored here, used by the
    /// control loop)
    pub ph_kp: f32,
    pub ph_ki: f32,
    pub ph_kd: f32,

    // --- Probe ---
    /// UART baud rate of the pH probe
    pub probe_baud_rate: u32,
    /// Temperature (Celsius) sent as compensation at startup
    pub compensation_temperature_c: f32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Data-log row interval (seconds)
    pub datalog_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            tank_id: 0,

            target_ph: 8.1,
            ph_kp: 100_000.0,
            ph_ki: 0.0,
            ph_kd: 0.0,

            probe_baud_rate: 9600,
            compensation_temperature_c: 20.0,

            control_loop_interval_ms: 1000, // 1 Hz
            datalog_interval_secs: 1,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Returns the name of the first bad field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.target_ph > 0.0 && self.target_ph <= 14.0) {
            return Err("target_ph must be in (0, 14]");
        }
        if ![self.ph_kp, self.ph_ki, self.ph_kd]
            .iter()
            .all(|g| g.is_finite() && *g >= 0.0)
        {
            return Err("PID gains must be finite and non-negative");
        }
        if !SUPPORTED_BAUD_RATES.contains(&self.probe_baud_rate) {
            return Err("probe_baud_rate not supported by the probe");
        }
        let t = f64::from(self.compensation_temperature_c);
        if !crate::probe::command::is_valid_compensation(t) {
            return Err("compensation_temperature_c must be in (0, 100)");
        }
        if self.control_loop_interval_ms == 0 {
            return Err("control_loop_interval_ms must be non-zero");
        }
        if self.datalog_interval_secs == 0 {
            return Err("datalog_interval_secs must be non-zero");
        }
        Ok(())
    }

    /// Control ticks between data-log rows (at least one).
    pub fn datalog_every_ticks(&self) -> u32 {
        let interval_ms = self.datalog_interval_secs.saturating_mul(1000);
        (interval_ms / self.control_loop_interval_ms.max(1)).max(1)
    }
}
