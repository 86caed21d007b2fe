//! State for the device dialog.

use crate::energy::DeviceConsumptionEnergyPreference;
use crate::ui::mvi::UiState;
use crate::ui::picker::StatisticPickerState;

/// Control that receives Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogFocus {
    #[default]
    Picker,
    Cancel,
    Save,
}

impl DialogFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Picker => Self::Cancel,
            Self::Cancel => Self::Save,
            Self::Save => Self::Picker,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Picker => Self::Save,
            Self::Cancel => Self::Picker,
            Self::Save => Self::Cancel,
        }
    }
}

/// Everything shown while the dialog is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceForm {
    /// Device built from the picked statistic. `None` until a non-empty value is picked.
    pub device: Option<DeviceConsumptionEnergyPreference>,
    /// Message of the last failed save.
    pub error: Option<String>,
    /// A save callback is in flight.
    pub saving: bool,
    pub focus: DialogFocus,
    pub picker: StatisticPickerState,
}

/// State of the device dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DeviceDialogState {
    /// Dialog is not visible.
    #[default]
    Closed,

    /// Dialog is visible.
    Open(DeviceForm),
}

impl UiState for DeviceDialogState {}

impl DeviceDialogState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn form(&self) -> Option<&DeviceForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }

    pub fn device(&self) -> Option<&DeviceConsumptionEnergyPreference> {
        self.form().and_then(|form| form.device.as_ref())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.form().and_then(|form| form.error.as_deref())
    }

    pub fn is_saving(&self) -> bool {
        self.form().is_some_and(|form| form.saving)
    }

    /// Whether the Save button is enabled.
    pub fn can_save(&self) -> bool {
        match self {
            Self::Open(form) => {
                !form.saving
                    && form
                        .device
                        .as_ref()
                        .is_some_and(|d| !d.stat_consumption.is_empty())
            }
            Self::Closed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_is_default() {
        assert_eq!(DeviceDialogState::default(), DeviceDialogState::Closed);
    }

    #[test]
    fn closed_cannot_save() {
        assert!(!DeviceDialogState::Closed.can_save());
        assert!(!DeviceDialogState::Closed.is_open());
        assert_eq!(DeviceDialogState::Closed.error_message(), None);
    }

    #[test]
    fn can_save_needs_device_and_idle() {
        let mut form = DeviceForm::default();
        assert!(!DeviceDialogState::Open(form.clone()).can_save());

        form.device = Some(DeviceConsumptionEnergyPreference::new("sensor.tv_energy"));
        assert!(DeviceDialogState::Open(form.clone()).can_save());

        form.saving = true;
        assert!(!DeviceDialogState::Open(form).can_save());
    }

    #[test]
    fn focus_cycles_both_ways() {
        let focus = DialogFocus::Picker;
        assert_eq!(focus.next().next().next(), DialogFocus::Picker);
        assert_eq!(focus.prev(), DialogFocus::Save);
        assert_eq!(DialogFocus::Save.prev(), DialogFocus::Cancel);
    }
}
