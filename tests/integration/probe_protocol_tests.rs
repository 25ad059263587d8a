//! Wire-level tests: bytes in on the simulated UART, commands out.

use super::mock_probe::{fresh_probe, sent};

use tankcontroller::ProbeError;
use tankcontroller::adapters::uart::SimUart;
use tankcontroller::probe::{PhCalibration, PhProbe, ProbeCommand};

#[test]
fn construction_disables_ack_then_enables_continuous_mode() {
    let probe = PhProbe::new(SimUart::new());
    assert_eq!(probe.transport().tx_lines(), vec!["*OK,0\r", "C,1\r"]);
    assert_eq!(probe.ph(), 0.0);
    assert_eq!(probe.slope(), "");
}

#[test]
fn continuous_readings_keep_the_latest() {
    let mut probe = fresh_probe();
    probe
        .transport_mut()
        .inject_rx(b"7.001\r7.002\r7.125\r");
    probe.on_data_available();
    assert!((probe.ph() - 7.125).abs() < 1e-6);
    assert_eq!(probe.lines_received(), 3);
}

#[test]
fn reading_split_across_deliveries() {
    let mut probe = fresh_probe();
    probe.transport_mut().inject_rx(b"6.");
    probe.on_data_available();
    assert_eq!(probe.ph(), 0.0);

    probe.transport_mut().inject_rx(b"93\r");
    probe.on_data_available();
    assert!((probe.ph() - 6.93).abs() < 1e-6);
}

#[test]
fn drains_everything_with_small_uart_reads() {
    let mut probe = fresh_probe();
    probe.transport_mut().set_max_read(3);
    probe
        .transport_mut()
        .inject_rx(b"8.10\r?Slope,98.2,101.0,-2.5\r8.12\r");
    probe.on_data_available();

    assert_eq!(probe.transport().rx_pending(), 0);
    assert!((probe.ph() - 8.12).abs() < 1e-6);
    assert_eq!(probe.slope(), "98.2,101.0,-2.5");
}

#[test]
fn slope_request_and_answer() {
    let mut probe = fresh_probe();
    probe.request_slope();
    assert_eq!(sent(&mut probe), vec!["Slope,?\r"]);

    probe
        .transport_mut()
        .inject_rx(b"?Slope,99.7,100.3,-0.89\r");
    probe.on_data_available();

    assert_eq!(probe.slope_response(), "?Slope,99.7,100.3,-0.89\r");
    assert_eq!(probe.slope(), "99.7,100.3,-0.89");
    let report = probe.slope_report().unwrap();
    assert!((report.acid_percent - 99.7).abs() < 1e-4);
    assert!((report.base_percent - 100.3).abs() < 1e-4);
    assert!((report.zero_offset_mv + 0.89).abs() < 1e-4);
}

#[test]
fn newer_slope_answer_replaces_older() {
    let mut probe = fresh_probe();
    probe
        .transport_mut()
        .inject_rx(b"?Slope,99.7,100.3,-0.89\r?Slope,97.0,99.0,1.5\r");
    probe.on_data_available();
    assert_eq!(probe.slope(), "97.0,99.0,1.5");
}

#[test]
fn other_queries_and_noise_are_ignored() {
    let mut probe = fresh_probe();
    probe.transport_mut().inject_rx(b"7.5\r?Slope,1,2,3\r");
    probe.on_data_available();
    let slope_before = probe.slope_response().to_owned();

    probe
        .transport_mut()
        .inject_rx(b"?T,25.00\r*OK\r*ER\r\r?Cal,2\r");
    probe.on_data_available();

    assert!((probe.ph() - 7.5).abs() < 1e-6);
    assert_eq!(probe.slope_response(), slope_before);
}

#[test]
fn unmatched_queries_leave_slope_empty() {
    let mut probe = fresh_probe();
    probe.transport_mut().inject_rx(b"?Cal,2\r?Slop\r");
    probe.on_data_available();

    assert_eq!(probe.slope(), "");
    assert_eq!(probe.slope_response(), "");
    assert_eq!(probe.lines_received(), 2);
}

#[test]
fn garbage_burst_does_not_poison_the_stream() {
    let mut probe = fresh_probe();
    probe.transport_mut().inject_rx(&[b'x'; 500]);
    probe.transport_mut().inject_rx(b"\r7.20\r");
    probe.on_data_available();
    assert!((probe.ph() - 7.20).abs() < 1e-6);
}

#[test]
fn calibration_sequences_on_the_wire() {
    let mut probe = fresh_probe();

    probe.clear_calibration();
    assert_eq!(sent(&mut probe), vec!["Cal,clear\r"]);

    probe.one_point_calibration(7.0);
    assert_eq!(sent(&mut probe), vec!["Cal,mid,7.000\r"]);

    probe.two_point_calibration(6.5, 7.0);
    assert_eq!(sent(&mut probe), vec!["Cal,mid,7.000\r", "Cal,low,6.500\r"]);

    probe.three_point_calibration(4.0, 7.0, 10.0);
    assert_eq!(
        sent(&mut probe),
        vec!["Cal,mid,7.000\r", "Cal,low,4.000\r", "Cal,high,10.000\r"]
    );
}

#[test]
fn temperature_compensation_fallback() {
    let mut probe = fresh_probe();
    probe.set_temperature_compensation(150.0);
    probe.set_temperature_compensation(25.5);
    probe.set_temperature_compensation(f64::NAN);
    assert_eq!(sent(&mut probe), vec!["T,20\r", "T,25.50\r", "T,20\r"]);
}

#[test]
fn failed_transport_surfaces_through_send_only() {
    let mut probe = fresh_probe();
    probe.transport_mut().fail_writes(true);

    probe.one_point_calibration(7.0);
    assert!(probe.transport().tx_lines().is_empty());
    assert_eq!(
        probe.send(ProbeCommand::ClearCalibration),
        Err(ProbeError::TransportWrite)
    );

    probe.transport_mut().fail_writes(false);
    assert_eq!(probe.send(ProbeCommand::ClearCalibration), Ok(()));
    assert_eq!(sent(&mut probe), vec!["Cal,clear\r"]);
}
