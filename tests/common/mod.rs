//! Shared test utilities.

#![allow(dead_code)]

use std::sync::Arc;

use energy_dialog::energy::DeviceConsumptionEnergyPreference;
use energy_dialog::ui::device_dialog::{DeviceDialogParams, DialogEvent, EnergyDeviceDialog};
use energy_dialog::ui::picker::PickerFilter;
use parking_lot::Mutex;
use tokio::sync::mpsc;

pub type Calls = Arc<Mutex<Vec<DeviceConsumptionEnergyPreference>>>;

/// A dialog plus the receiving end of its closed notifications.
pub fn dialog_with_events() -> (EnergyDeviceDialog, mpsc::UnboundedReceiver<DialogEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EnergyDeviceDialog::new(PickerFilter::default(), tx), rx)
}

/// Params whose callback succeeds and records every device it is given.
pub fn recording_params() -> (DeviceDialogParams, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let params = DeviceDialogParams::new(move |device| {
        let sink = Arc::clone(&sink);
        async move {
            sink.lock().push(device);
            Ok::<(), anyhow::Error>(())
        }
    });
    (params, calls)
}

/// Params whose callback always fails with `message`.
pub fn failing_params(message: &'static str) -> DeviceDialogParams {
    DeviceDialogParams::new(move |_device| async move {
        Err::<(), _>(anyhow::anyhow!(message))
    })
}
