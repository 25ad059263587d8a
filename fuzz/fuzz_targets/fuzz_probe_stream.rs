//! Fuzz target: `PhProbe::on_data_available`
//!
//! Splits the input into arbitrary UART deliveries and feeds them to a
//! driver on the simulated UART.  The driver must never panic and must
//! always drain the transport.
//!
//! cargo fuzz run fuzz_probe_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use tankcontroller::adapters::uart::SimUart;
use tankcontroller::probe::PhProbe;

fuzz_target!(|data: &[u8]| {
    let Some((&chunk, rest)) = data.split_first() else {
        return;
    };
    let mut probe = PhProbe::new(SimUart::new());
    probe.transport_mut().set_max_read(usize::from(chunk));

    for delivery in rest.chunks(usize::from(chunk).max(1) * 3) {
        probe.transport_mut().inject_rx(delivery);
        probe.on_data_available();
        assert_eq!(probe.transport().rx_pending(), 0);
    }

    let _ = probe.slope();
    let _ = probe.slope_report();
});
