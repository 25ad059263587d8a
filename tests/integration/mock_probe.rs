//! Mock adapters for integration tests.
//!
//! Records every calibration call and every emitted event so tests can
//! assert on the full history without a probe on the wire.

use tankcontroller::adapters::uart::SimUart;
use tankcontroller::app::events::AppEvent;
use tankcontroller::app::ports::{DataLogRow, DataLogSink, EventSink};
use tankcontroller::probe::{PhCalibration, PhProbe};

// ── Calibration call record ───────────────────────────────────

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum CalCall {
    Clear,
    OnePoint(f64),
    TwoPoint { low: f64, mid: f64 },
    ThreePoint { low: f64, mid: f64, high: f64 },
    Low(f64),
    High(f64),
}

#[derive(Debug, Default)]
pub struct MockCalibration {
    pub calls: Vec<CalCall>,
}

impl PhCalibration for MockCalibration {
    fn clear_calibration(&mut self) {
        self.calls.push(CalCall::Clear);
    }

    fn one_point_calibration(&mut self, midpoint: f64) {
        self.calls.push(CalCall::OnePoint(midpoint));
    }

    fn two_point_calibration(&mut self, lowpoint: f64, midpoint: f64) {
        self.calls.push(CalCall::TwoPoint {
            low: lowpoint,
            mid: midpoint,
        });
    }

    fn three_point_calibration(&mut self, lowpoint: f64, midpoint: f64, highpoint: f64) {
        self.calls.push(CalCall::ThreePoint {
            low: lowpoint,
            mid: midpoint,
            high: highpoint,
        });
    }

    fn low_point_calibration(&mut self, lowpoint: f64) {
        self.calls.push(CalCall::Low(lowpoint));
    }

    fn high_point_calibration(&mut self, highpoint: f64) {
        self.calls.push(CalCall::High(highpoint));
    }
}

// ── Sinks ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingDataLog {
    pub rows: Vec<DataLogRow>,
}

impl DataLogSink for RecordingDataLog {
    fn append(&mut self, row: &DataLogRow) {
        self.rows.push(*row);
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// A probe on a simulated UART with the start-up commands already
/// taken off the TX log.
pub fn fresh_probe() -> PhProbe<SimUart> {
    let mut probe = PhProbe::new(SimUart::new());
    probe.transport_mut().take_tx();
    probe
}

/// Commands written since the last call, terminators kept.
pub fn sent(probe: &mut PhProbe<SimUart>) -> Vec<String> {
    let lines = probe.transport().tx_lines();
    probe.transport_mut().take_tx();
    lines
}
