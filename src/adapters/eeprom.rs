//! EEPROM-style configuration store.
//!
//! Implements [`ConfigPort`] by keeping the whole [`SystemConfig`] as one
//! postcard blob.  On ESP32 the blob lives in the default NVS partition
//! (the chip has no EEPROM); on host it lives in memory so tests can
//! inspect and corrupt it.
//!
//! Every `save` runs [`SystemConfig::validate`] first; out-of-range
//! values are rejected, never clamped.

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};

#[cfg(target_os = "espidf")]
const CONFIG_NAMESPACE: &str = "tankctl";
#[cfg(target_os = "espidf")]
const CONFIG_KEY: &str = "syscfg";

/// Upper bound on the stored blob.
const MAX_BLOB_SIZE: usize = 256;

pub struct EepromAdapter {
    #[cfg(target_os = "espidf")]
    nvs: core::cell::RefCell<EspNvs<NvsDefault>>,
    #[cfg(not(target_os = "espidf"))]
    blob: core::cell::RefCell<Option<Vec<u8>>>,
}

impl EepromAdapter {
    /// Open the config namespace on the default NVS partition.
    #[cfg(target_os = "espidf")]
    pub fn new(partition: EspDefaultNvsPartition) -> Result<Self, ConfigError> {
        let nvs = EspNvs::new(partition, CONFIG_NAMESPACE, true).map_err(|e| {
            warn!("EEPROM: cannot open namespace {}: {}", CONFIG_NAMESPACE, e);
            ConfigError::IoError
        })?;
        info!("EepromAdapter: NVS namespace {} open", CONFIG_NAMESPACE);
        Ok(Self {
            nvs: core::cell::RefCell::new(nvs),
        })
    }

    /// Empty in-memory store.
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        info!("EepromAdapter: simulation backend");
        Self {
            blob: core::cell::RefCell::new(None),
        }
    }

    /// Raw stored bytes (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn raw_blob(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }

    /// Overwrite the stored bytes (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn set_raw_blob(&self, bytes: &[u8]) {
        *self.blob.borrow_mut() = Some(bytes.to_vec());
    }

    #[cfg(target_os = "espidf")]
    fn read_blob(&self, buf: &mut [u8]) -> Result<Option<usize>, ConfigError> {
        let nvs = self.nvs.borrow();
        match nvs.get_blob(CONFIG_KEY, buf) {
            Ok(found) => Ok(found.map(<[u8]>::len)),
            Err(e) => {
                warn!("EEPROM: read failed: {}", e);
                Err(ConfigError::IoError)
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self, buf: &mut [u8]) -> Result<Option<usize>, ConfigError> {
        let blob = self.blob.borrow();
        let Some(bytes) = blob.as_ref() else {
            return Ok(None);
        };
        let dst = buf.get_mut(..bytes.len()).ok_or(ConfigError::Corrupted)?;
        dst.copy_from_slice(bytes);
        Ok(Some(bytes.len()))
    }

    #[cfg(target_os = "espidf")]
    fn write_blob(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        self.nvs
            .borrow_mut()
            .set_blob(CONFIG_KEY, bytes)
            .map_err(|e| {
                warn!("EEPROM: write failed: {}", e);
                ConfigError::IoError
            })
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_blob(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        self.set_raw_blob(bytes);
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for EepromAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for EepromAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let Some(len) = self.read_blob(&mut buf)? else {
            info!("EepromAdapter: no stored config, using defaults");
            return Ok(SystemConfig::default());
        };
        let cfg: SystemConfig = postcard::from_bytes(&buf[..len]).map_err(|_| {
            warn!("EEPROM: stored config does not decode ({} bytes)", len);
            ConfigError::Corrupted
        })?;
        cfg.validate().map_err(ConfigError::ValidationFailed)?;
        info!("EepromAdapter: loaded config ({} bytes)", len);
        Ok(cfg)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let bytes = postcard::to_slice(config, &mut buf).map_err(|_| ConfigError::IoError)?;
        self.write_blob(bytes)?;
        info!("EepromAdapter: saved config ({} bytes)", bytes.len());
        Ok(())
    }
}
