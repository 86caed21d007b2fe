use crate::context::HostContext;
use crate::energy::{DeviceConsumptionEnergyPreference, PreferencesStore};
use crate::ui::device_dialog::{
    DeviceDialogParams, DialogEvent, EnergyDeviceDialog, PendingSave, SaveOutcome, DIALOG_NAME,
};
use crate::ui::picker::PickerFilter;
use anyhow::Context;
use tokio::sync::mpsc;

/// Host application: lists configured devices and manages the overlay
/// stack the device dialog is pushed onto.
pub struct App {
    should_quit: bool,
    context: HostContext,
    store: PreferencesStore,
    dialog: EnergyDeviceDialog,
    dialog_events: mpsc::UnboundedReceiver<DialogEvent>,
    /// Names of dialogs currently shown, innermost last.
    open_dialogs: Vec<&'static str>,
    status: Option<String>,
}

impl App {
    pub fn new(context: HostContext, store: PreferencesStore, filter: PickerFilter) -> Self {
        let (events_tx, dialog_events) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            context,
            store,
            dialog: EnergyDeviceDialog::new(filter, events_tx),
            dialog_events,
            open_dialogs: Vec::new(),
            status: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    pub fn dialog(&self) -> &EnergyDeviceDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut EnergyDeviceDialog {
        &mut self.dialog
    }

    pub fn open_dialogs(&self) -> &[&'static str] {
        &self.open_dialogs
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn devices(&self) -> Vec<DeviceConsumptionEnergyPreference> {
        self.store.get().device_consumption
    }

    /// Open the device dialog with a save callback that appends to the store.
    pub fn open_device_dialog(&mut self) {
        let store = self.store.clone();
        let params = DeviceDialogParams::new(move |device| {
            let store = store.clone();
            async move {
                tokio::task::spawn_blocking(move || store.add_device(device))
                    .await
                    .context("save task failed")??;
                Ok::<(), anyhow::Error>(())
            }
        });

        self.status = None;
        self.dialog.show_dialog(params);
        self.open_dialogs.push(DIALOG_NAME);
    }

    /// Start a save from the dialog. The caller drives the returned future.
    pub fn begin_save(&mut self) -> Option<PendingSave> {
        self.dialog.begin_save()
    }

    pub fn on_save_finished(
        &mut self,
        generation: u64,
        device: DeviceConsumptionEnergyPreference,
        result: anyhow::Result<()>,
    ) {
        if let SaveOutcome::Saved(device) = self.dialog.finish_save(generation, device, result) {
            self.status = Some(format!("Added {}", device.stat_consumption));
        }
        self.drain_dialog_events();
    }

    pub fn on_tick(&mut self) {
        self.drain_dialog_events();
    }

    /// Drop closed dialogs from the overlay stack. Repeated notifications
    /// for a dialog that is no longer open are ignored.
    pub fn drain_dialog_events(&mut self) {
        while let Ok(event) = self.dialog_events.try_recv() {
            match event {
                DialogEvent::Closed { dialog } => {
                    if let Some(index) = self.open_dialogs.iter().rposition(|d| *d == dialog) {
                        self.open_dialogs.remove(index);
                    } else {
                        tracing::trace!(dialog, "Close for dialog that is not open");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::picker::PickerEvent;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let store = PreferencesStore::open(dir.path().join("energy.json")).unwrap();
        App::new(HostContext::default(), store, PickerFilter::default())
    }

    #[test]
    fn opening_pushes_dialog_and_closing_pops_it() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.open_device_dialog();
        assert_eq!(app.open_dialogs(), &[DIALOG_NAME]);

        app.dialog_mut().close_dialog();
        app.dialog_mut().close_dialog();
        app.drain_dialog_events();
        assert!(app.open_dialogs().is_empty());
    }

    #[tokio::test]
    async fn successful_save_adds_device_and_reports_status() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.open_device_dialog();
        app.dialog_mut().statistic_changed(PickerEvent::ValueChanged {
            value: "sensor.kettle_energy".into(),
        });

        let pending = app.begin_save().unwrap();
        let result = pending.future.await;
        app.on_save_finished(pending.generation, pending.device, result);

        assert!(!app.dialog().is_open());
        assert!(app.open_dialogs().is_empty());
        assert_eq!(app.status(), Some("Added sensor.kettle_energy"));
        assert_eq!(
            app.devices(),
            vec![DeviceConsumptionEnergyPreference::new("sensor.kettle_energy")]
        );
    }

    #[tokio::test]
    async fn duplicate_device_keeps_dialog_open_with_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.store
            .add_device(DeviceConsumptionEnergyPreference::new("sensor.kettle_energy"))
            .unwrap();

        app.open_device_dialog();
        app.dialog_mut().statistic_changed(PickerEvent::ValueChanged {
            value: "sensor.kettle_energy".into(),
        });
        let pending = app.begin_save().unwrap();
        let result = pending.future.await;
        app.on_save_finished(pending.generation, pending.device, result);

        assert!(app.dialog().is_open());
        assert_eq!(app.open_dialogs(), &[DIALOG_NAME]);
        assert_eq!(
            app.dialog().state().error_message(),
            Some("Statistic 'sensor.kettle_energy' is already used by another device")
        );
    }
}
