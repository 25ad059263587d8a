//! UART transport for the pH probe.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`ProbeUart`] wraps the UART1 driver (9600 8N1, no flow
//! control) with non-blocking reads.
//! On host/test: [`SimUart`] is an in-memory stand-in.  Tests inject the
//! bytes the probe would send and inspect every command written to it.

use crate::transport::Transport;

// ═══════════════════════════════════════════════════════════════════════════
//  ESP-IDF UART driver
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(target_os = "espidf")]
pub use esp_impl::ProbeUart;

#[cfg(target_os = "espidf")]
mod esp_impl {
    use esp_idf_hal::delay::{NON_BLOCK, TickType};
    use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin};
    use esp_idf_hal::peripheral::Peripheral;
    use esp_idf_hal::uart::{Uart, UartDriver, config::Config};
    use esp_idf_hal::units::Hertz;
    use esp_idf_svc::sys::EspError;
    use log::info;

    use crate::transport::Transport;

    /// Upper bound on waiting for the TX FIFO to drain (ms).
    const TX_DONE_TIMEOUT_MS: u64 = 50;

    pub struct ProbeUart {
        driver: UartDriver<'static>,
    }

    impl ProbeUart {
        pub fn new<U: Uart>(
            uart: impl Peripheral<P = U> + 'static,
            tx: impl Peripheral<P = impl OutputPin> + 'static,
            rx: impl Peripheral<P = impl InputPin> + 'static,
            baud_rate: u32,
        ) -> Result<Self, EspError> {
            let config = Config::default().baudrate(Hertz(baud_rate));
            let driver = UartDriver::new(
                uart,
                tx,
                rx,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            )?;
            info!("ProbeUart: UART ready at {} baud", baud_rate);
            Ok(Self { driver })
        }
    }

    impl Transport for ProbeUart {
        type Error = EspError;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
            self.driver.read(buf, NON_BLOCK)
        }

        fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
            self.driver.write(data)
        }

        fn flush(&mut self) -> Result<(), EspError> {
            let ticks = TickType::new_millis(TX_DONE_TIMEOUT_MS).ticks();
            self.driver.wait_tx_done(ticks)
        }

        fn available(&self) -> bool {
            self.driver.remaining_read().map(|n| n > 0).unwrap_or(false)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Host simulation
// ═══════════════════════════════════════════════════════════════════════════

/// Error injected by [`SimUart::fail_writes`].
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimUartError;

/// In-memory UART: an RX queue filled by the test and a TX log.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimUart {
    rx: std::collections::VecDeque<u8>,
    tx: Vec<u8>,
    fail_writes: bool,
    /// Cap on bytes returned per `read`, to exercise chunked delivery.
    max_read: Option<usize>,
}

#[cfg(not(target_os = "espidf"))]
impl SimUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if the probe had sent them.
    pub fn inject_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Bytes not yet consumed by the driver.
    pub fn rx_pending(&self) -> usize {
        self.rx.len()
    }

    /// Everything written so far, leaving the log empty.
    pub fn take_tx(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }

    /// Written bytes split into commands, terminator kept.
    pub fn tx_lines(&self) -> Vec<String> {
        self.tx
            .split_inclusive(|&b| b == b'\r')
            .map(|cmd| String::from_utf8_lossy(cmd).into_owned())
            .collect()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Deliver at most `n` bytes per `read` call.
    pub fn set_max_read(&mut self, n: usize) {
        self.max_read = Some(n.max(1));
    }
}

#[cfg(not(target_os = "espidf"))]
impl Transport for SimUart {
    type Error = SimUartError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SimUartError> {
        let limit = self.max_read.map_or(buf.len(), |m| m.min(buf.len()));
        let n = limit.min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, SimUartError> {
        if self.fail_writes {
            return Err(SimUartError);
        }
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), SimUartError> {
        Ok(())
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}
