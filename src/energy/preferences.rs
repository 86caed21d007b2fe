use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A device whose energy consumption is tracked by one statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConsumptionEnergyPreference {
    /// Statistic id, e.g. `sensor.fridge_energy`.
    pub stat_consumption: String,
}

impl DeviceConsumptionEnergyPreference {
    pub fn new(stat_consumption: impl Into<String>) -> Self {
        Self {
            stat_consumption: stat_consumption.into(),
        }
    }
}

/// Persisted energy configuration. Only the device list is modelled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyPreferences {
    #[serde(default)]
    pub device_consumption: Vec<DeviceConsumptionEnergyPreference>,
}

impl EnergyPreferences {
    pub fn has_device(&self, stat_consumption: &str) -> bool {
        self.device_consumption
            .iter()
            .any(|d| d.stat_consumption == stat_consumption)
    }
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Failed to read energy preferences '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write energy preferences '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse energy preferences '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Statistic '{stat_consumption}' is already used by another device")]
    DuplicateDevice { stat_consumption: String },
}

/// JSON-file backed energy preferences, shared between the UI and save tasks.
#[derive(Clone)]
pub struct PreferencesStore {
    inner: Arc<Mutex<EnergyPreferences>>,
    path: PathBuf,
}

impl PreferencesStore {
    /// Load preferences from `path`. A missing file yields empty preferences.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let prefs = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| PreferencesError::Read {
                path: path.clone(),
                source: e,
            })?;
            serde_json::from_str(&content).map_err(|e| PreferencesError::Parse {
                path: path.clone(),
                source: e,
            })?
        } else {
            EnergyPreferences::default()
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(prefs)),
            path,
        })
    }

    pub fn get(&self) -> EnergyPreferences {
        self.inner.lock().clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a device and persist. The in-memory copy only changes once
    /// the file has been written.
    pub fn add_device(
        &self,
        device: DeviceConsumptionEnergyPreference,
    ) -> Result<(), PreferencesError> {
        let mut guard = self.inner.lock();
        if guard.has_device(&device.stat_consumption) {
            return Err(PreferencesError::DuplicateDevice {
                stat_consumption: device.stat_consumption,
            });
        }

        let mut updated = guard.clone();
        updated.device_consumption.push(device);
        self.write(&updated)?;
        *guard = updated;
        Ok(())
    }

    fn write(&self, prefs: &EnergyPreferences) -> Result<(), PreferencesError> {
        let write_err = |e| PreferencesError::Write {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let json = serde_json::to_string_pretty(prefs)
            .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        // Write-then-rename so a crash never leaves a truncated file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}
