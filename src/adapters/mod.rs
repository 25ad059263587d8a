//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements   | Connects to                      |
//! |------------|--------------|----------------------------------|
//! | `uart`     | Transport    | ESP32 UART1 / in-memory sim      |
//! | `log_sink` | EventSink    | Serial log output                |
//! |            | DataLogSink  | Serial log output (CSV rows)     |
//! | `eeprom`   | ConfigPort   | NVS blob / in-memory store       |

pub mod eeprom;
pub mod log_sink;
pub mod uart;
