//! pH probe protocol driver.
//!
//! [`PhProbe`] is the only component allowed to talk to the probe.  It owns
//! the transport, the latest reading, and the latest slope answer.
//!
//! ```text
//!   commands ──▶ PhProbe::send ──▶ Transport::write      (fire-and-forget)
//!   Transport::read ──▶ on_data_available ──▶ LineAssembler ──▶ classify
//!                                                   │
//!                                     ph / slope_response updated here only
//! ```
//!
//! Exactly one instance exists per process.  `main` constructs it and
//! moves it into the application service; nothing reaches it through a
//! global.
//!
//! ## Request/response correlation
//!
//! There is none.  Commands never wait for their answer and the probe
//! also streams one reading per second, so [`PhProbe::slope`] reports the
//! most recent `?Slope,` line no matter which call site asked for it or
//! how long ago.  Callers must tolerate stale values.

use log::{debug, info, warn};

use crate::error::ProbeError;
use crate::transport::Transport;

use super::PhCalibration;
use super::command::{CalibrationPoint, ProbeCommand};
use super::parser::{LineAssembler, ProbeLine, ProbeResponse, classify};
use super::slope::{SlopeReport, extract_slope};

/// Scratch buffer size for one transport read.
const READ_CHUNK: usize = 64;

pub struct PhProbe<T: Transport> {
    transport: T,
    assembler: LineAssembler,
    /// Latest pH reading.  Written only by `on_data_available`.
    ph: f32,
    /// Latest raw `?Slope,...\r` line.  Written only by `on_data_available`.
    slope_response: ProbeLine,
    lines_received: u32,
}

impl<T: Transport> PhProbe<T> {
    /// Take ownership of the transport and put the probe in the operating
    /// mode the rest of the system assumes: no `*OK` acknowledgements and
    /// one unsolicited reading per second.
    pub fn new(transport: T) -> Self {
        let mut probe = Self {
            transport,
            assembler: LineAssembler::new(),
            ph: 0.0,
            slope_response: ProbeLine::new(),
            lines_received: 0,
        };
        probe.fire(ProbeCommand::DisableAck);
        probe.fire(ProbeCommand::ContinuousMode);
        info!("PROBE: initialised (acks off, continuous mode)");
        probe
    }

    // ── Commands ──────────────────────────────────────────────

    /// Encode and write one command.
    pub fn send(&mut self, cmd: ProbeCommand) -> Result<(), ProbeError> {
        let encoded = cmd.encode()?;
        debug!("PROBE tx: {:?}", encoded.as_str());
        let bytes = encoded.as_bytes();
        let written = self
            .transport
            .write(bytes)
            .map_err(|_| ProbeError::TransportWrite)?;
        if written != bytes.len() {
            return Err(ProbeError::ShortWrite {
                written,
                expected: bytes.len(),
            });
        }
        self.transport
            .flush()
            .map_err(|_| ProbeError::TransportWrite)
    }

    /// Send without waiting for or reporting an outcome beyond the log.
    fn fire(&mut self, cmd: ProbeCommand) {
        if let Err(e) = self.send(cmd) {
            warn!("PROBE: {:?} not sent: {}", cmd, e);
        }
    }

    /// Ask the probe for its calibration slope.  The answer arrives later
    /// through [`on_data_available`](Self::on_data_available).
    pub fn request_slope(&mut self) {
        self.fire(ProbeCommand::SlopeQuery);
    }

    /// Set the temperature the probe compensates for.  Anything outside
    /// (0, 100) °C, including NaN, is replaced by 20 °C so a failed
    /// temperature sensor cannot skew the pH reading.
    pub fn set_temperature_compensation(&mut self, celsius: f64) {
        self.fire(ProbeCommand::TemperatureCompensation(celsius));
    }

    // ── Inbound data ──────────────────────────────────────────

    /// Drain everything the transport currently holds and process every
    /// complete line.  A trailing partial line stays buffered for the next
    /// call.
    ///
    /// Takes `&mut self`, so it can never be re-entered while running.
    pub fn on_data_available(&mut self) {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = match self.transport.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    warn!("PROBE: {} ({:?})", ProbeError::TransportRead, e);
                    break;
                }
            };
            for &byte in &chunk[..n] {
                if let Some(line) = self.assembler.push(byte) {
                    self.handle_line(line);
                }
            }
        }
    }

    fn handle_line(&mut self, line: ProbeLine) {
        self.lines_received = self.lines_received.wrapping_add(1);
        debug!("PROBE rx: {:?}", line.as_str());

        match classify(&line) {
            ProbeResponse::Reading(value) => self.ph = value,
            ProbeResponse::SlopeAnswer => self.slope_response = line,
            ProbeResponse::UnknownQuery | ProbeResponse::Noise => {}
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Latest pH reading (0.0 until the first one arrives).
    pub fn ph(&self) -> f32 {
        self.ph
    }

    /// Slope fragment of the latest `?Slope,` answer, e.g.
    /// `99.7,100.3,-0.89`, or `""` if no usable answer was received.
    ///
    /// Does not consume the answer: repeated calls return the same value
    /// until a new one arrives.  Nothing ties the answer to a particular
    /// [`request_slope`](Self::request_slope): right after a request this
    /// may still be the previous answer.
    pub fn slope(&self) -> &str {
        let slope = extract_slope(&self.slope_response);
        if !slope.is_empty() {
            info!("Calibration Slope: {}", slope);
        }
        slope
    }

    /// Typed view of [`slope`](Self::slope).
    pub fn slope_report(&self) -> Option<SlopeReport> {
        SlopeReport::parse(extract_slope(&self.slope_response))
    }

    /// Raw stored slope answer, terminator included.
    pub fn slope_response(&self) -> &str {
        &self.slope_response
    }

    /// Lines received since construction (wraps).
    pub fn lines_received(&self) -> u32 {
        self.lines_received
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: Transport> PhCalibration for PhProbe<T> {
    fn clear_calibration(&mut self) {
        self.fire(ProbeCommand::ClearCalibration);
    }

    fn one_point_calibration(&mut self, midpoint: f64) {
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::Mid, midpoint));
    }

    fn two_point_calibration(&mut self, lowpoint: f64, midpoint: f64) {
        // Mid first: setting the midpoint clears the stored lowpoint.
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::Mid, midpoint));
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::Low, lowpoint));
    }

    fn three_point_calibration(&mut self, lowpoint: f64, midpoint: f64, highpoint: f64) {
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::Mid, midpoint));
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::Low, lowpoint));
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::High, highpoint));
    }

    fn low_point_calibration(&mut self, lowpoint: f64) {
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::Low, lowpoint));
    }

    fn high_point_calibration(&mut self, highpoint: f64) {
        self.fire(ProbeCommand::Calibrate(CalibrationPoint::High, highpoint));
    }
}
