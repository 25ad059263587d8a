//! Log-based sink adapters.
//!
//! [`LogEventSink`] implements [`EventSink`] and [`LogDataSink`] implements
//! [`DataLogSink`] by writing single-line records to the logger (UART /
//! USB-CDC in production).  An SD-card CSV logger would implement the
//! same `DataLogSink` trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{DataLogRow, DataLogSink, EventSink};

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} | pH={:.3} target={:.2} | cal={} | lines={}",
                    t.state,
                    t.ph,
                    t.target_ph,
                    if t.in_calibration { "ON" } else { "off" },
                    t.lines_received,
                );
            }
            AppEvent::UiStateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::CalibrationIssued { point, value } => {
                info!("CAL | {} = {:.3}", point.as_str(), value);
            }
            AppEvent::CalibrationCleared => {
                info!("CAL | cleared");
            }
            AppEvent::SlopeRequested => {
                info!("PROBE | slope requested");
            }
            AppEvent::SlopeReported(Some(r)) => {
                info!(
                    "PROBE | slope acid={:.1}% base={:.1}% offset={:.2}mV",
                    r.acid_percent, r.base_percent, r.zero_offset_mv
                );
            }
            AppEvent::SlopeReported(None) => {
                info!("PROBE | slope unavailable");
            }
            AppEvent::TemperatureCompensationSet(t) => {
                info!("PROBE | temperature compensation {:.2}\u{00b0}C", t);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}

/// Data logger that writes CSV-shaped rows to the console.
#[derive(Debug, Default)]
pub struct LogDataSink {
    rows: u32,
}

impl LogDataSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows written so far.
    pub fn rows(&self) -> u32 {
        self.rows
    }
}

impl DataLogSink for LogDataSink {
    fn append(&mut self, row: &DataLogRow) {
        if self.rows == 0 {
            info!("DATA | tankid,pH,target");
        }
        info!("DATA | {},{:.3},{:.3}", row.tank_id, row.ph, row.target_ph);
        self.rows = self.rows.wrapping_add(1);
    }
}
