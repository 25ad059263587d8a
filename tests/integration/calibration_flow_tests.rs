//! Keypad-driven calibration through the UI machine, against a mock probe.

use super::mock_probe::{CalCall, MockCalibration};

use tankcontroller::fsm::{Key, KeyOutcome, StateId, UiFsm};

fn type_keys(fsm: &mut UiFsm, probe: &mut MockCalibration, keys: &str) -> KeyOutcome {
    keys.chars()
        .filter_map(Key::from_char)
        .fold(KeyOutcome::Ignored, |_, key| fsm.key(key, probe))
}

#[test]
fn full_two_buffer_session() {
    let mut fsm = UiFsm::new();
    let mut probe = MockCalibration::default();

    fsm.select(StateId::PhCalibrationMid);
    type_keys(&mut fsm, &mut probe, "7A");
    fsm.select(StateId::PhCalibrationLow);
    type_keys(&mut fsm, &mut probe, "4A");

    assert_eq!(probe.calls, vec![CalCall::OnePoint(7.0), CalCall::Low(4.0)]);
    assert_eq!(fsm.current_state(), StateId::MainMenu);
}

#[test]
fn highpoint_state_calibrates_high_only() {
    let mut fsm = UiFsm::new();
    let mut probe = MockCalibration::default();
    fsm.select(StateId::PhCalibrationHigh);
    assert!(fsm.is_in_calibration());
    assert_eq!(fsm.current().prompt(), "pH-Highpoint    ");

    let outcome = type_keys(&mut fsm, &mut probe, "10*0A");
    assert_eq!(
        outcome,
        KeyOutcome::Applied {
            state: StateId::PhCalibrationHigh,
            value: 10.0
        }
    );
    assert_eq!(probe.calls, vec![CalCall::High(10.0)]);
}

#[test]
fn editing_keys_before_accept() {
    let mut fsm = UiFsm::new();
    let mut probe = MockCalibration::default();
    fsm.select(StateId::PhCalibrationMid);

    // 9 → backspace → 6.8 → clear → 7.01
    type_keys(&mut fsm, &mut probe, "9B6*8C7*01");
    assert_eq!(fsm.entry_text(), "7.01");
    type_keys(&mut fsm, &mut probe, "A");
    assert_eq!(probe.calls, vec![CalCall::OnePoint(7.01)]);
}

#[test]
fn invalid_entry_stays_put_and_sends_nothing() {
    let mut fsm = UiFsm::new();
    let mut probe = MockCalibration::default();
    fsm.select(StateId::PhCalibrationLow);

    assert_eq!(type_keys(&mut fsm, &mut probe, "A"), KeyOutcome::Rejected);
    assert_eq!(type_keys(&mut fsm, &mut probe, "*A"), KeyOutcome::Rejected);
    assert_eq!(fsm.current_state(), StateId::PhCalibrationLow);
    assert!(fsm.is_in_calibration());
    assert!(probe.calls.is_empty());

    // A digit after the lone point makes it valid.
    type_keys(&mut fsm, &mut probe, "5A");
    assert_eq!(probe.calls, vec![CalCall::Low(0.5)]);
}

#[test]
fn cancel_returns_to_menu_without_calibrating() {
    let mut fsm = UiFsm::new();
    let mut probe = MockCalibration::default();
    fsm.select(StateId::PhCalibrationLow);
    type_keys(&mut fsm, &mut probe, "4D");
    assert_eq!(fsm.current_state(), StateId::MainMenu);
    assert!(!fsm.is_in_calibration());
    assert!(probe.calls.is_empty());
}

#[test]
fn midpoint_does_not_suspend_controls() {
    let mut fsm = UiFsm::new();
    fsm.select(StateId::PhCalibrationMid);
    assert!(!fsm.is_in_calibration());
    assert_eq!(fsm.prior_value(), Some(0.0));
}
