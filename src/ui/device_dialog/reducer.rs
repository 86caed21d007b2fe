//! Reducer for the device dialog.

use crate::energy::DeviceConsumptionEnergyPreference;
use crate::ui::mvi::Reducer;

use super::intent::DeviceDialogIntent;
use super::state::{DeviceDialogState, DeviceForm};

pub struct DeviceDialogReducer;

impl Reducer for DeviceDialogReducer {
    type State = DeviceDialogState;
    type Intent = DeviceDialogIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // Reopening always starts from a blank form.
            DeviceDialogIntent::Open => DeviceDialogState::Open(DeviceForm::default()),

            DeviceDialogIntent::Close => DeviceDialogState::Closed,

            DeviceDialogIntent::StatisticChanged { value } => update(state, |form| {
                if value.is_empty() {
                    form.device = None;
                    form.picker.set_value(None);
                } else {
                    form.device = Some(DeviceConsumptionEnergyPreference::new(value.clone()));
                    form.picker.set_value(Some(value));
                }
            }),

            DeviceDialogIntent::QueryInput(ch) => update(state, |form| form.picker.push_char(ch)),

            DeviceDialogIntent::QueryBackspace => update(state, |form| form.picker.pop_char()),

            DeviceDialogIntent::MoveHighlight { delta, match_count } => update(state, |form| {
                form.picker.move_highlight(delta, match_count)
            }),

            DeviceDialogIntent::FocusNext => update(state, |form| form.focus = form.focus.next()),

            DeviceDialogIntent::FocusPrev => update(state, |form| form.focus = form.focus.prev()),

            DeviceDialogIntent::SaveStarted => {
                if !state.can_save() {
                    return state;
                }
                update(state, |form| form.saving = true)
            }

            DeviceDialogIntent::SaveFailed { message } => update(state, |form| {
                form.saving = false;
                form.error = Some(message);
            }),
        }
    }
}

/// Apply `f` to the open form; a closed dialog is left untouched.
fn update(state: DeviceDialogState, f: impl FnOnce(&mut DeviceForm)) -> DeviceDialogState {
    match state {
        DeviceDialogState::Open(mut form) => {
            f(&mut form);
            DeviceDialogState::Open(form)
        }
        closed => closed,
    }
}
