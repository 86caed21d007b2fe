//! Energy-tracking data: device preferences, their JSON store, and the
//! statistic catalog the picker chooses from.

mod preferences;
mod statistics;

pub use preferences::{
    DeviceConsumptionEnergyPreference, EnergyPreferences, PreferencesError, PreferencesStore,
};
pub use statistics::{CatalogError, StatisticMetadata};
