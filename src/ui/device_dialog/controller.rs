//! Dialog controller: owns the open parameters and the dialog state, runs
//! the save callback and reports closing to the dialog manager.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::mpsc;

use crate::context::HostContext;
use crate::energy::DeviceConsumptionEnergyPreference;
use crate::ui::mvi::Reducer;
use crate::ui::picker::{PickerEvent, PickerFilter, MAX_VISIBLE_MATCHES};

use super::intent::DeviceDialogIntent;
use super::reducer::DeviceDialogReducer;
use super::state::DeviceDialogState;

/// Name carried by the closed notification.
pub const DIALOG_NAME: &str = "dialog-energy-device-settings";

pub type SaveFuture = BoxFuture<'static, anyhow::Result<()>>;

/// Persists a device. Supplied by whoever opens the dialog.
pub type SaveCallback =
    Arc<dyn Fn(DeviceConsumptionEnergyPreference) -> SaveFuture + Send + Sync>;

/// Parameters passed when the dialog is opened.
#[derive(Clone)]
pub struct DeviceDialogParams {
    pub save_callback: SaveCallback,
}

impl DeviceDialogParams {
    pub fn new<F, Fut>(save: F) -> Self
    where
        F: Fn(DeviceConsumptionEnergyPreference) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            save_callback: Arc::new(move |device| Box::pin(save(device))),
        }
    }
}

impl fmt::Debug for DeviceDialogParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDialogParams").finish_non_exhaustive()
    }
}

/// Notifications for the dialog manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    Closed { dialog: &'static str },
}

pub type DialogEventSender = mpsc::UnboundedSender<DialogEvent>;

/// A save callback that has been started but not awaited.
///
/// Tagged with the dialog generation so a result that arrives after the
/// dialog was closed or reopened is dropped.
pub struct PendingSave {
    pub generation: u64,
    pub device: DeviceConsumptionEnergyPreference,
    pub future: SaveFuture,
}

impl fmt::Debug for PendingSave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSave")
            .field("generation", &self.generation)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Callback succeeded and the dialog closed.
    Saved(DeviceConsumptionEnergyPreference),
    /// Callback failed; the message is shown in the dialog.
    Failed(String),
    /// Nothing happened: save was disabled, or the result was stale.
    Ignored,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $intent:expr) => {
        $self.state = DeviceDialogReducer::reduce(std::mem::take(&mut $self.state), $intent);
    };
}

pub struct EnergyDeviceDialog {
    state: DeviceDialogState,
    /// Open parameters (resource, managed outside MVI).
    params: Option<DeviceDialogParams>,
    filter: PickerFilter,
    events: DialogEventSender,
    generation: u64,
}

impl EnergyDeviceDialog {
    pub fn new(filter: PickerFilter, events: DialogEventSender) -> Self {
        Self {
            state: DeviceDialogState::default(),
            params: None,
            filter,
            events,
            generation: 0,
        }
    }

    pub fn state(&self) -> &DeviceDialogState {
        &self.state
    }

    pub fn params(&self) -> Option<&DeviceDialogParams> {
        self.params.as_ref()
    }

    pub fn filter(&self) -> &PickerFilter {
        &self.filter
    }

    pub fn is_open(&self) -> bool {
        self.params.is_some()
    }

    pub fn can_save(&self) -> bool {
        self.params.is_some() && self.state.can_save()
    }

    pub fn show_dialog(&mut self, params: DeviceDialogParams) {
        self.generation += 1;
        self.params = Some(params);
        dispatch_mvi!(self, DeviceDialogIntent::Open);
        tracing::debug!(dialog = DIALOG_NAME, "Dialog opened");
    }

    /// Clear all dialog state and notify the dialog manager.
    ///
    /// Every call emits one `Closed` event, even if already closed.
    pub fn close_dialog(&mut self) {
        self.generation += 1;
        self.params = None;
        dispatch_mvi!(self, DeviceDialogIntent::Close);
        if self
            .events
            .send(DialogEvent::Closed {
                dialog: DIALOG_NAME,
            })
            .is_err()
        {
            tracing::debug!(dialog = DIALOG_NAME, "No dialog manager listening");
        }
        tracing::debug!(dialog = DIALOG_NAME, "Dialog closed");
    }

    pub fn statistic_changed(&mut self, event: PickerEvent) {
        let PickerEvent::ValueChanged { value } = event;
        dispatch_mvi!(self, DeviceDialogIntent::StatisticChanged { value });
    }

    pub fn type_query(&mut self, ch: char) {
        dispatch_mvi!(self, DeviceDialogIntent::QueryInput(ch));
    }

    pub fn backspace_query(&mut self) {
        dispatch_mvi!(self, DeviceDialogIntent::QueryBackspace);
    }

    pub fn move_highlight(&mut self, ctx: &HostContext, delta: isize) {
        let Some(form) = self.state.form() else {
            return;
        };
        let match_count = form
            .picker
            .matches(ctx.statistics(), &self.filter)
            .len()
            .min(MAX_VISIBLE_MATCHES);
        dispatch_mvi!(self, DeviceDialogIntent::MoveHighlight { delta, match_count });
    }

    /// Choose the highlighted statistic, as if clicked in the picker.
    pub fn pick_highlighted(&mut self, ctx: &HostContext) {
        let event = self
            .state
            .form()
            .and_then(|form| form.picker.pick(ctx.statistics(), &self.filter));
        if let Some(event) = event {
            self.statistic_changed(event);
        }
    }

    pub fn clear_selection(&mut self) {
        self.statistic_changed(PickerEvent::cleared());
    }

    pub fn focus_next(&mut self) {
        dispatch_mvi!(self, DeviceDialogIntent::FocusNext);
    }

    pub fn focus_prev(&mut self) {
        dispatch_mvi!(self, DeviceDialogIntent::FocusPrev);
    }

    /// Invoke the save callback without awaiting it.
    ///
    /// Returns `None` when Save is disabled, including while another save
    /// is still in flight.
    pub fn begin_save(&mut self) -> Option<PendingSave> {
        if !self.can_save() {
            return None;
        }
        let device = self.state.device()?.clone();
        let callback = Arc::clone(&self.params.as_ref()?.save_callback);

        dispatch_mvi!(self, DeviceDialogIntent::SaveStarted);
        tracing::debug!(statistic = %device.stat_consumption, "Saving device");

        Some(PendingSave {
            generation: self.generation,
            future: callback(device.clone()),
            device,
        })
    }

    /// Apply the result of a save started by [`begin_save`](Self::begin_save).
    pub fn finish_save(
        &mut self,
        generation: u64,
        device: DeviceConsumptionEnergyPreference,
        result: anyhow::Result<()>,
    ) -> SaveOutcome {
        if generation != self.generation || !self.state.is_open() {
            tracing::debug!(generation, "Dropping stale save result");
            return SaveOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                tracing::info!(statistic = %device.stat_consumption, "Device saved");
                self.close_dialog();
                SaveOutcome::Saved(device)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    statistic = %device.stat_consumption,
                    error = %message,
                    "Saving device failed"
                );
                dispatch_mvi!(
                    self,
                    DeviceDialogIntent::SaveFailed {
                        message: message.clone()
                    }
                );
                SaveOutcome::Failed(message)
            }
        }
    }

    /// Invoke the save callback and wait for it.
    pub async fn save(&mut self) -> SaveOutcome {
        let Some(pending) = self.begin_save() else {
            return SaveOutcome::Ignored;
        };
        let result = pending.future.await;
        self.finish_save(pending.generation, pending.device, result)
    }
}
