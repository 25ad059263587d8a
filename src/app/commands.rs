//! Inbound commands to the application service.
//!
//! These represent actions requested from outside the keypad path (serial
//! console, scheduler, tests) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::fsm::StateId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// `Cal,clear`.
    ClearCalibration,

    /// Ask the probe for its slope; the answer arrives asynchronously.
    RequestSlope,

    /// Log and emit whatever slope answer is currently stored.
    ReportSlope,

    OnePointCalibration { midpoint: f64 },

    TwoPointCalibration { lowpoint: f64, midpoint: f64 },

    ThreePointCalibration {
        lowpoint: f64,
        midpoint: f64,
        highpoint: f64,
    },

    SetTemperatureCompensation(f64),

    /// Change the target pH handed to the data logger.
    SetTargetPh(f32),

    /// Jump the UI machine to a state (menu navigation belongs to the UI
    /// shell, which uses this to enter the calibration leaves).
    EnterState(StateId),
}
