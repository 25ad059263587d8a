//! Tank controller firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ProbeUart      LogEventSink   LogDataSink    EepromAdapter    │
//! │  (Transport)    (EventSink)    (DataLogSink)  (ConfigPort)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  PhProbe · UiFsm                                       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keypad input is taken from the serial console until the UI shell's
//! membrane keypad scanner is wired in.
#![deny(unused_must_use)]

use std::io::Read;
use std::sync::mpsc;

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};

use tankcontroller::adapters::eeprom::EepromAdapter;
use tankcontroller::adapters::log_sink::{LogDataSink, LogEventSink};
use tankcontroller::adapters::uart::ProbeUart;
use tankcontroller::app::ports::ConfigPort;
use tankcontroller::app::service::AppService;
use tankcontroller::config::SystemConfig;
use tankcontroller::events::{self, Event, push_event};
use tankcontroller::fsm::Key;
use tankcontroller::probe::PhProbe;
use tankcontroller::transport::Transport;

/// Main loop granularity; probe bytes are noticed within this window.
const POLL_INTERVAL_MS: u32 = 20;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Tank controller v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let peripherals = Peripherals::take()?;

    // ── 2. Load config (or defaults) ──────────────────────────
    let store = match EepromAdapter::new(EspDefaultNvsPartition::take()?) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!("Config store unavailable ({}), running with defaults", e);
            None
        }
    };
    let config = match store.as_ref().map(|s| s.load()) {
        Some(Ok(cfg)) => cfg,
        Some(Err(e)) => {
            warn!("Config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
        None => SystemConfig::default(),
    };

    // ── 3. Probe on UART1 (TX GPIO17, RX GPIO18) ──────────────
    let uart = ProbeUart::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        config.probe_baud_rate,
    )?;
    let probe = PhProbe::new(uart);

    // ── 4. Application core ───────────────────────────────────
    let mut app = AppService::new(probe, config.clone());
    let mut log_sink = LogEventSink::new();
    let mut datalog = LogDataSink::new();
    app.start(&mut log_sink);

    let keys = spawn_console_keypad()?;

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    let polls_per_tick = (config.control_loop_interval_ms / POLL_INTERVAL_MS).max(1);
    let ticks_per_row = config.datalog_every_ticks();
    let mut polls: u32 = 0;
    let mut ticks: u32 = 0;

    loop {
        FreeRtos::delay_ms(POLL_INTERVAL_MS);

        if app.probe().transport().available() {
            push_event(Event::ProbeDataAvailable);
        }
        while let Ok(c) = keys.try_recv() {
            push_event(Event::KeyPressed(c));
        }

        polls += 1;
        if polls >= polls_per_tick {
            polls = 0;
            push_event(Event::ControlTick);
            ticks += 1;
            if ticks >= ticks_per_row {
                ticks = 0;
                push_event(Event::DataLogTick);
            }
        }

        events::drain_events(|event| match event {
            Event::ProbeDataAvailable => app.on_probe_data(),
            Event::ControlTick => app.tick(&mut log_sink),
            Event::DataLogTick => app.log_data(&mut datalog),
            Event::KeyPressed(c) => {
                if let Some(key) = Key::from_char(c) {
                    app.key_press(key, &mut log_sink);
                }
            }
        });
    }
}

/// Forward console characters to the main loop as keypad presses.
fn spawn_console_keypad() -> Result<mpsc::Receiver<char>> {
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("keypad".into())
        .stack_size(4096)
        .spawn(move || {
            let mut stdin = std::io::stdin();
            let mut byte = [0u8; 1];
            loop {
                match stdin.read(&mut byte) {
                    Ok(1) => {
                        if tx.send(char::from(byte[0])).is_err() {
                            break;
                        }
                    }
                    _ => FreeRtos::delay_ms(50),
                }
            }
        })?;
    Ok(rx)
}
