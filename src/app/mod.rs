//! Application core: domain logic with all I/O behind traits.
//!
//! Owns the probe driver, the calibration UI machine and the live
//! configuration.  Everything outside (event log, data logger, config
//! storage) is reached through the **port traits** in [`ports`].

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
