//! "Add a device" dialog for the energy configuration.
//!
//! Lets the user pick the statistic that tracks a device's consumption
//! and hands it to a caller-supplied save callback.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Dialog state enum
//! - `intent.rs` - User/system actions
//! - `reducer.rs` - State transitions
//! - `dialog.rs` - Rendering
//! - `controller.rs` - Open parameters, save callback, closed notification

mod controller;
mod dialog;
mod intent;
mod reducer;
mod state;

pub use controller::{
    DeviceDialogParams, DialogEvent, DialogEventSender, EnergyDeviceDialog, PendingSave,
    SaveCallback, SaveFuture, SaveOutcome, DIALOG_NAME,
};
pub use dialog::render_device_dialog;
pub use intent::DeviceDialogIntent;
pub use reducer::DeviceDialogReducer;
pub use state::{DeviceDialogState, DeviceForm, DialogFocus};
