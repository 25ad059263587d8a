//! Integration tests for the AppService → PhProbe → UART pipeline.
//!
//! These verify that commands and keypad input reach the wire in the
//! right order and that the service reports what it did through the
//! event and data-log ports.

use super::mock_probe::{RecordingDataLog, RecordingSink, fresh_probe, sent};

use tankcontroller::Error;
use tankcontroller::adapters::eeprom::EepromAdapter;
use tankcontroller::adapters::uart::SimUart;
use tankcontroller::app::commands::AppCommand;
use tankcontroller::app::events::AppEvent;
use tankcontroller::app::ports::ConfigPort;
use tankcontroller::app::service::AppService;
use tankcontroller::config::SystemConfig;
use tankcontroller::fsm::{Key, StateId};
use tankcontroller::probe::{CalibrationPoint, SlopeReport};

fn make_app() -> (AppService<SimUart>, RecordingSink) {
    let mut app = AppService::new(fresh_probe(), SystemConfig::default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    sent(app.probe_mut());
    sink.clear();
    (app, sink)
}

fn press(app: &mut AppService<SimUart>, sink: &mut RecordingSink, keys: &str) {
    for c in keys.chars() {
        if let Some(key) = Key::from_char(c) {
            app.key_press(key, sink);
        }
    }
}

#[test]
fn start_announces_main_menu() {
    let mut app = AppService::new(fresh_probe(), SystemConfig::default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::TemperatureCompensationSet(20.0),
            AppEvent::Started(StateId::MainMenu),
        ]
    );
    assert!(!app.is_in_calibration());
}

#[test]
fn two_point_command_sends_midpoint_first() {
    let (mut app, mut sink) = make_app();
    app.handle_command(
        AppCommand::TwoPointCalibration {
            lowpoint: 4.0,
            midpoint: 7.0,
        },
        &mut sink,
    );
    assert_eq!(
        sent(app.probe_mut()),
        vec!["Cal,mid,7.000\r", "Cal,low,4.000\r"]
    );
    assert_eq!(
        sink.events,
        vec![
            AppEvent::CalibrationIssued {
                point: CalibrationPoint::Mid,
                value: 7.0
            },
            AppEvent::CalibrationIssued {
                point: CalibrationPoint::Low,
                value: 4.0
            },
        ]
    );
}

#[test]
fn three_point_and_clear_commands() {
    let (mut app, mut sink) = make_app();
    app.handle_command(AppCommand::ClearCalibration, &mut sink);
    app.handle_command(
        AppCommand::ThreePointCalibration {
            lowpoint: 4.0,
            midpoint: 7.0,
            highpoint: 10.0,
        },
        &mut sink,
    );
    assert_eq!(
        sent(app.probe_mut()),
        vec![
            "Cal,clear\r",
            "Cal,mid,7.000\r",
            "Cal,low,4.000\r",
            "Cal,high,10.000\r"
        ]
    );
    assert_eq!(sink.events[0], AppEvent::CalibrationCleared);
    assert_eq!(sink.events.len(), 4);
}

#[test]
fn slope_request_then_report() {
    let (mut app, mut sink) = make_app();
    app.handle_command(AppCommand::RequestSlope, &mut sink);
    assert_eq!(sent(app.probe_mut()), vec!["Slope,?\r"]);

    // Nothing received yet: the report is empty, not an error.
    app.handle_command(AppCommand::ReportSlope, &mut sink);
    assert_eq!(sink.events.last(), Some(&AppEvent::SlopeReported(None)));

    app.probe_mut()
        .transport_mut()
        .inject_rx(b"?Slope,99.7,100.3,-0.89\r");
    app.on_probe_data();
    app.handle_command(AppCommand::ReportSlope, &mut sink);

    let Some(AppEvent::SlopeReported(Some(SlopeReport {
        acid_percent,
        base_percent,
        ..
    }))) = sink.events.last().cloned()
    else {
        panic!("expected a decoded slope, got {:?}", sink.events.last());
    };
    assert!((acid_percent - 99.7).abs() < 1e-4);
    assert!((base_percent - 100.3).abs() < 1e-4);
}

#[test]
fn temperature_command_reports_requested_value() {
    let (mut app, mut sink) = make_app();
    app.handle_command(AppCommand::SetTemperatureCompensation(120.0), &mut sink);
    assert_eq!(sent(app.probe_mut()), vec!["T,20\r"]);
    assert_eq!(
        sink.events,
        vec![AppEvent::TemperatureCompensationSet(120.0)]
    );
}

#[test]
fn data_log_rows_carry_tank_reading_and_target() {
    let config = SystemConfig {
        tank_id: 4,
        target_ph: 6.9,
        ..SystemConfig::default()
    };
    let mut app = AppService::new(fresh_probe(), config);
    let mut sink = RecordingSink::new();
    let mut log = RecordingDataLog::default();

    app.log_data(&mut log);
    app.probe_mut().transport_mut().inject_rx(b"7.31\r");
    app.tick(&mut sink);
    app.log_data(&mut log);

    assert_eq!(log.rows.len(), 2);
    assert_eq!(log.rows[0].tank_id, 4);
    assert_eq!(log.rows[0].ph, 0.0);
    assert!((log.rows[1].ph - 7.31).abs() < 1e-6);
    assert!((log.rows[1].target_ph - 6.9).abs() < 1e-6);
}

#[test]
fn telemetry_tracks_calibration_flag() {
    let (mut app, mut sink) = make_app();
    app.handle_command(AppCommand::EnterState(StateId::PhCalibrationLow), &mut sink);
    app.tick(&mut sink);

    let Some(AppEvent::Telemetry(t)) = sink.events.last().cloned() else {
        panic!("tick must emit telemetry");
    };
    assert_eq!(t.state, StateId::PhCalibrationLow);
    assert!(t.in_calibration);
}

#[test]
fn lowpoint_via_keypad_keeps_actuators_off_until_accept() {
    let (mut app, mut sink) = make_app();
    app.handle_command(AppCommand::EnterState(StateId::PhCalibrationLow), &mut sink);
    assert!(app.is_in_calibration());

    press(&mut app, &mut sink, "4*01");
    assert!(app.is_in_calibration());
    assert!(sent(app.probe_mut()).is_empty());

    press(&mut app, &mut sink, "A");
    assert!(!app.is_in_calibration());
    assert_eq!(sent(app.probe_mut()), vec!["Cal,low,4.010\r"]);
    assert_eq!(app.state(), StateId::MainMenu);
}

#[test]
fn saved_target_survives_reload() {
    let (mut app, mut sink) = make_app();
    let store = EepromAdapter::new();
    app.handle_command(AppCommand::SetTargetPh(7.6), &mut sink);
    app.save_config(&store).unwrap();

    let reloaded = store.load().unwrap();
    assert!((reloaded.target_ph - 7.6).abs() < 1e-6);
    assert_eq!(&reloaded, app.config());
}

#[test]
fn invalid_live_config_is_not_saved() {
    let config = SystemConfig {
        datalog_interval_secs: 0,
        ..SystemConfig::default()
    };
    let app = AppService::new(fresh_probe(), config);
    let store = EepromAdapter::new();

    assert_eq!(
        app.save_config(&store),
        Err(Error::Config("datalog_interval_secs must be non-zero"))
    );
    assert!(store.raw_blob().is_none());
}
