//! A modal dialog for attaching an energy-consumption statistic to a device,
//! plus the terminal host that runs it.

pub mod config;
pub mod context;
pub mod energy;
pub mod logging;
pub mod ui;
