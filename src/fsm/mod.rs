//! Operator UI state machine (calibration slice).
//!
//! The full menu tree belongs to the UI shell; this engine carries only
//! what the pH calibration leaves need:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateId            UiState            NumberCollector        │
//! │  ─────────────────  ─────────────────  ────────────────────   │
//! │  MainMenu           name · prompt      -                      │
//! │  PhCalibrationMid   name · prompt      prior · set_value      │
//! │  PhCalibrationLow   name · prompt · ✓  set_value              │
//! │  PhCalibrationHigh  name · prompt · ✓  set_value              │
//! └───────────────────────────────────────────────────────────────┘
//!                                 ✓ = is_in_calibration() overridden
//! ```
//!
//! Keypad input edits a [`NumberEntry`]; on accept the current state's
//! `set_value` runs against the probe and the engine returns to the main
//! menu.  An entry that does not parse is rejected and the state stays.

pub mod entry;
pub mod states;

pub use entry::{Key, NumberEntry};

use log::{info, warn};

use crate::probe::PhCalibration;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    MainMenu = 0,
    PhCalibrationMid = 1,
    PhCalibrationLow = 2,
    PhCalibrationHigh = 3,
}

impl StateId {
    pub const ALL: [StateId; 4] = [
        Self::MainMenu,
        Self::PhCalibrationMid,
        Self::PhCalibrationLow,
        Self::PhCalibrationHigh,
    ];
}

// ---------------------------------------------------------------------------
// State contracts
// ---------------------------------------------------------------------------

/// What the UI renderer needs from every state.
pub trait UiState: Sync {
    /// Identifier shown in logs.
    fn name(&self) -> &'static str;

    /// First display row, exactly 16 characters.
    fn prompt(&self) -> &'static str;

    /// While `true`, the control loop keeps actuators (solenoids) off.
    fn is_in_calibration(&self) -> bool {
        false
    }
}

/// States that collect one number from the keypad.
pub trait NumberCollector: Sync {
    /// Value used to pre-seed the input field, if any.
    fn prior_value(&self) -> Option<f32> {
        None
    }

    /// Act on the accepted value.
    fn set_value(&self, probe: &mut dyn PhCalibration, value: f64);
}

// ---------------------------------------------------------------------------
// Key outcome
// ---------------------------------------------------------------------------

/// Result of feeding one key to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    /// The current state does not take keypad input.
    Ignored,
    /// The entry was edited (or the edit was refused, e.g. full).
    Edited,
    /// Accept pressed with an empty or unparsable entry.
    Rejected,
    /// A value was handed to the probe; the engine is back at the main menu.
    Applied { state: StateId, value: f64 },
    /// Operator backed out to the main menu.
    Cancelled { state: StateId },
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct UiFsm {
    current: StateId,
    entry: NumberEntry,
}

impl UiFsm {
    /// Start at the main menu.
    pub fn new() -> Self {
        Self {
            current: StateId::MainMenu,
            entry: NumberEntry::new(),
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn current(&self) -> &'static dyn UiState {
        states::state(self.current)
    }

    pub fn is_in_calibration(&self) -> bool {
        self.current().is_in_calibration()
    }

    /// Text typed so far in the current state.
    pub fn entry_text(&self) -> &str {
        self.entry.as_str()
    }

    /// Prior-value hint of the current state, if it has one.
    pub fn prior_value(&self) -> Option<f32> {
        states::collector(self.current).and_then(|c| c.prior_value())
    }

    /// Move to `next`, discarding any partial entry.
    pub fn select(&mut self, next: StateId) {
        if next == self.current {
            return;
        }
        info!(
            "UI transition: {} -> {}",
            self.current().name(),
            states::state(next).name()
        );
        self.current = next;
        self.entry.clear();
    }

    /// Feed one keypad key.
    pub fn key(&mut self, key: Key, probe: &mut dyn PhCalibration) -> KeyOutcome {
        let Some(collector) = states::collector(self.current) else {
            return KeyOutcome::Ignored;
        };
        let state = self.current;

        match key {
            Key::Accept => match self.entry.value() {
                Some(value) => {
                    info!("UI: {} accepted {}", self.current().name(), value);
                    collector.set_value(probe, value);
                    self.select(StateId::MainMenu);
                    KeyOutcome::Applied { state, value }
                }
                None => {
                    warn!(
                        "UI: {} rejected entry {:?}",
                        self.current().name(),
                        self.entry.as_str()
                    );
                    KeyOutcome::Rejected
                }
            },
            Key::Cancel => {
                self.select(StateId::MainMenu);
                KeyOutcome::Cancelled { state }
            }
            edit => {
                self.entry.edit(edit);
                KeyOutcome::Edited
            }
        }
    }
}

impl Default for UiFsm {
    fn default() -> Self {
        Self::new()
    }
}
