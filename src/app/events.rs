//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::StateId;
use crate::probe::{CalibrationPoint, SlopeReport};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started; carries the initial UI state.
    Started(StateId),

    /// The UI machine moved between states.
    UiStateChanged { from: StateId, to: StateId },

    /// A single calibration point was sent to the probe.
    CalibrationIssued { point: CalibrationPoint, value: f64 },

    /// The probe was told to forget all calibration points.
    CalibrationCleared,

    /// A slope query went out.
    SlopeRequested,

    /// The latest slope answer, as far as it could be decoded.
    SlopeReported(Option<SlopeReport>),

    /// Temperature compensation command issued (value as requested,
    /// before the out-of-range fallback).
    TemperatureCompensationSet(f64),

    /// Once-per-cycle snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub state: StateId,
    pub ph: f32,
    pub target_ph: f32,
    pub in_calibration: bool,
    pub lines_received: u32,
}
