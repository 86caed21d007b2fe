//! Intents for the device dialog.

use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum DeviceDialogIntent {
    /// Dialog was opened with fresh parameters.
    Open,

    /// Picker reported a new value. Empty clears the device.
    StatisticChanged { value: String },

    /// Character typed into the picker query.
    QueryInput(char),
    QueryBackspace,

    /// Move the picker highlight within `match_count` visible matches.
    MoveHighlight { delta: isize, match_count: usize },

    FocusNext,
    FocusPrev,

    /// Save callback was invoked.
    SaveStarted,

    /// Save callback failed with this message.
    SaveFailed { message: String },

    Close,
}

impl Intent for DeviceDialogIntent {}
