//! Statistic picker: a filterable list of energy statistics that reports
//! the chosen id through a typed [`PickerEvent`].

mod state;

pub use state::{PickerEvent, PickerFilter, StatisticPickerState, MAX_VISIBLE_MATCHES};
