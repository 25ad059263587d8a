//! Concrete UI states and their lookup table.
//!
//! Only the main menu and the pH calibration leaves live here.  Each leaf
//! collects one number and hands it to the probe; the engine then returns
//! to the main menu.
//!
//! ```text
//!  MAIN MENU ──[select]──▶ PH CAL MID  ──[accept]──▶ one_point_calibration
//!      ▲      ──[select]──▶ PH CAL LOW  ──[accept]──▶ low_point_calibration
//!      │      ──[select]──▶ PH CAL HIGH ──[accept]──▶ high_point_calibration
//!      └──────────────────────────────────────────────────────┘
//! ```

use super::{NumberCollector, StateId, UiState};
use crate::probe::PhCalibration;

// ═══════════════════════════════════════════════════════════════════════════
//  Table
// ═══════════════════════════════════════════════════════════════════════════

static MAIN_MENU: MainMenu = MainMenu;
static PH_CALIBRATION_MID: PhCalibrationMid = PhCalibrationMid;
static PH_CALIBRATION_LOW: PhCalibrationLow = PhCalibrationLow;
static PH_CALIBRATION_HIGH: PhCalibrationHigh = PhCalibrationHigh;

/// Display contract for any state.
pub fn state(id: StateId) -> &'static dyn UiState {
    match id {
        StateId::MainMenu => &MAIN_MENU,
        StateId::PhCalibrationMid => &PH_CALIBRATION_MID,
        StateId::PhCalibrationLow => &PH_CALIBRATION_LOW,
        StateId::PhCalibrationHigh => &PH_CALIBRATION_HIGH,
    }
}

/// Number-collecting behaviour, for states that have it.
pub fn collector(id: StateId) -> Option<&'static dyn NumberCollector> {
    match id {
        StateId::MainMenu => None,
        StateId::PhCalibrationMid => Some(&PH_CALIBRATION_MID),
        StateId::PhCalibrationLow => Some(&PH_CALIBRATION_LOW),
        StateId::PhCalibrationHigh => Some(&PH_CALIBRATION_HIGH),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  MAIN MENU
// ═══════════════════════════════════════════════════════════════════════════

pub struct MainMenu;

impl UiState for MainMenu {
    fn name(&self) -> &'static str {
        "MainMenu"
    }

    fn prompt(&self) -> &'static str {
        "Main Menu       "
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  pH midpoint
// ═══════════════════════════════════════════════════════════════════════════

/// Midpoint calibration.  Keeps the default `is_in_calibration`.
pub struct PhCalibrationMid;

impl UiState for PhCalibrationMid {
    fn name(&self) -> &'static str {
        "PHCalibrationMid"
    }

    fn prompt(&self) -> &'static str {
        "pH-Midpoint     "
    }
}

impl NumberCollector for PhCalibrationMid {
    fn prior_value(&self) -> Option<f32> {
        Some(0.0)
    }

    fn set_value(&self, probe: &mut dyn PhCalibration, value: f64) {
        probe.one_point_calibration(value);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  pH lowpoint
// ═══════════════════════════════════════════════════════════════════════════

pub struct PhCalibrationLow;

impl UiState for PhCalibrationLow {
    fn name(&self) -> &'static str {
        "PHCalibrationLow"
    }

    fn prompt(&self) -> &'static str {
        "pH-Lowpoint     "
    }

    /// Controls (solenoids) stay disabled while the probe sits in buffer.
    fn is_in_calibration(&self) -> bool {
        true
    }
}

impl NumberCollector for PhCalibrationLow {
    fn set_value(&self, probe: &mut dyn PhCalibration, value: f64) {
        probe.low_point_calibration(value);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  pH highpoint
// ═══════════════════════════════════════════════════════════════════════════

pub struct PhCalibrationHigh;

impl UiState for PhCalibrationHigh {
    fn name(&self) -> &'static str {
        "PHCalibrationHigh"
    }

    fn prompt(&self) -> &'static str {
        "pH-Highpoint    "
    }

    fn is_in_calibration(&self) -> bool {
        true
    }
}

impl NumberCollector for PhCalibrationHigh {
    fn set_value(&self, probe: &mut dyn PhCalibration, value: f64) {
        probe.high_point_calibration(value);
    }
}
