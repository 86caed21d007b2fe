use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub energy: EnergyConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Overrides for localized strings, keyed like `ui.common.save`.
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

/// Where energy data lives and which statistics the picker offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Energy preferences JSON file (default: `<data_dir>/energy-dialog/energy.json`).
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    /// Optional JSON array of statistic metadata for the picker.
    #[serde(default)]
    pub statistics_path: Option<PathBuf>,
    /// Units a statistic must report to be offered (default: `["kWh"]`).
    #[serde(default = "default_units")]
    pub units: Vec<String>,
    /// Only offer entity-backed statistics, not external ones (default: true).
    #[serde(default = "default_entities_only")]
    pub entities_only: bool,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_units() -> Vec<String> {
    vec!["kWh".to_string()]
}

fn default_entities_only() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            preferences_path: None,
            statistics_path: None,
            units: default_units(),
            entities_only: default_entities_only(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl EnergyConfig {
    /// Configured preferences path, or the platform data directory default.
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("energy-dialog")
                .join("energy.json")
        })
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
