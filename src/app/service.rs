//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the probe driver, the calibration UI machine and the
//! live configuration.  All I/O flows through the driver's
//! [`Transport`] or through port traits injected at call sites.
//!
//! ```text
//!   Transport ◀──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │       AppService        │
//!   Keypad ──────▶ │  PhProbe · UiFsm        │ ──▶ DataLogSink
//!                  └────────────────────────┘ ◀─▶ ConfigPort
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::fsm::{Key, KeyOutcome, StateId, UiFsm};
use crate::probe::{CalibrationPoint, PhCalibration, PhProbe};
use crate::transport::Transport;

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ConfigPort, DataLogRow, DataLogSink, EventSink};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService<T: Transport> {
    probe: PhProbe<T>,
    ui: UiFsm,
    config: SystemConfig,
    tick_count: u64,
}

impl<T: Transport> AppService<T> {
    /// Take ownership of an initialised probe driver.
    ///
    /// Does not touch the probe; call [`start`](Self::start) next.
    pub fn new(probe: PhProbe<T>, config: SystemConfig) -> Self {
        Self {
            probe,
            ui: UiFsm::new(),
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Send the configured temperature compensation and announce start.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let celsius = f64::from(self.config.compensation_temperature_c);
        self.probe.set_temperature_compensation(celsius);
        sink.emit(&AppEvent::TemperatureCompensationSet(celsius));
        sink.emit(&AppEvent::Started(self.ui.current_state()));
        info!(
            "AppService started (tank {}, target pH {:.2})",
            self.config.tank_id, self.config.target_ph
        );
    }

    // ── Per-event / per-tick orchestration ────────────────────

    /// Handle `Event::ProbeDataAvailable`.
    pub fn on_probe_data(&mut self) {
        self.probe.on_data_available();
    }

    /// One control cycle: pick up any probe output not yet signalled and
    /// publish a telemetry snapshot.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        self.tick_count += 1;
        self.probe.on_data_available();
        sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
    }

    /// Hand the latest reading and target to the data logger.
    pub fn log_data(&self, datalog: &mut impl DataLogSink) {
        datalog.append(&DataLogRow {
            tank_id: self.config.tank_id,
            ph: self.probe.ph(),
            target_ph: self.config.target_ph,
        });
    }

    // ── Operator input ────────────────────────────────────────

    /// Route one keypad key through the UI machine.
    pub fn key_press(&mut self, key: Key, sink: &mut impl EventSink) -> KeyOutcome {
        let from = self.ui.current_state();
        let outcome = self.ui.key(key, &mut self.probe);

        if let KeyOutcome::Applied { state, value } = outcome {
            if let Some(point) = calibration_point(state) {
                sink.emit(&AppEvent::CalibrationIssued { point, value });
            }
        }
        self.emit_transition(from, sink);
        outcome
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::ClearCalibration => {
                self.probe.clear_calibration();
                sink.emit(&AppEvent::CalibrationCleared);
            }
            AppCommand::RequestSlope => {
                self.probe.request_slope();
                sink.emit(&AppEvent::SlopeRequested);
            }
            AppCommand::ReportSlope => {
                // `slope()` logs the fragment itself.
                self.probe.slope();
                sink.emit(&AppEvent::SlopeReported(self.probe.slope_report()));
            }
            AppCommand::OnePointCalibration { midpoint } => {
                self.probe.one_point_calibration(midpoint);
                emit_points(sink, &[(CalibrationPoint::Mid, midpoint)]);
            }
            AppCommand::TwoPointCalibration { lowpoint, midpoint } => {
                self.probe.two_point_calibration(lowpoint, midpoint);
                emit_points(
                    sink,
                    &[
                        (CalibrationPoint::Mid, midpoint),
                        (CalibrationPoint::Low, lowpoint),
                    ],
                );
            }
            AppCommand::ThreePointCalibration {
                lowpoint,
                midpoint,
                highpoint,
            } => {
                self.probe
                    .three_point_calibration(lowpoint, midpoint, highpoint);
                emit_points(
                    sink,
                    &[
                        (CalibrationPoint::Mid, midpoint),
                        (CalibrationPoint::Low, lowpoint),
                        (CalibrationPoint::High, highpoint),
                    ],
                );
            }
            AppCommand::SetTemperatureCompensation(celsius) => {
                self.probe.set_temperature_compensation(celsius);
                sink.emit(&AppEvent::TemperatureCompensationSet(celsius));
            }
            AppCommand::SetTargetPh(target) => {
                let candidate = SystemConfig {
                    target_ph: target,
                    ..self.config.clone()
                };
                match candidate.validate() {
                    Ok(()) => {
                        self.config = candidate;
                        info!("Target pH set to {:.2}", target);
                    }
                    Err(e) => warn!("Target pH {} rejected: {}", target, e),
                }
            }
            AppCommand::EnterState(target) => {
                let from = self.ui.current_state();
                self.ui.select(target);
                self.emit_transition(from, sink);
            }
        }
    }

    // ── Config ────────────────────────────────────────────────

    /// Persist the live configuration.
    pub fn save_config(&self, storage: &impl ConfigPort) -> crate::Result<()> {
        storage.save(&self.config)?;
        info!("Config saved");
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.ui.current_state(),
            ph: self.probe.ph(),
            target_ph: self.config.target_ph,
            in_calibration: self.ui.is_in_calibration(),
            lines_received: self.probe.lines_received(),
        }
    }

    /// Current UI state.
    pub fn state(&self) -> StateId {
        self.ui.current_state()
    }

    /// `true` while a calibration state that needs the actuators off is
    /// active.  The control loop checks this every cycle.
    pub fn is_in_calibration(&self) -> bool {
        self.ui.is_in_calibration()
    }

    pub fn ui(&self) -> &UiFsm {
        &self.ui
    }

    pub fn probe(&self) -> &PhProbe<T> {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut PhProbe<T> {
        &mut self.probe
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_transition(&self, from: StateId, sink: &mut impl EventSink) {
        let to = self.ui.current_state();
        if to != from {
            sink.emit(&AppEvent::UiStateChanged { from, to });
        }
    }
}

fn calibration_point(state: StateId) -> Option<CalibrationPoint> {
    match state {
        StateId::PhCalibrationMid => Some(CalibrationPoint::Mid),
        StateId::PhCalibrationLow => Some(CalibrationPoint::Low),
        StateId::PhCalibrationHigh => Some(CalibrationPoint::High),
        StateId::MainMenu => None,
    }
}

fn emit_points(sink: &mut impl EventSink, points: &[(CalibrationPoint, f64)]) {
    for &(point, value) in points {
        sink.emit(&AppEvent::CalibrationIssued { point, value });
    }
}
