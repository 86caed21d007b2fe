use crate::ui::app::App;
use crate::ui::device_dialog::{DialogFocus, PendingSave};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action to take after processing a key event.
pub enum InputAction {
    /// No further action needed (handled internally).
    None,
    /// A save callback was started and must be driven to completion.
    Save(PendingSave),
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return InputAction::None;
    }

    if !app.dialog().is_open() {
        match key.code {
            KeyCode::Char('a' | 'A') => app.open_device_dialog(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => app.request_quit(),
            _ => {}
        }
        return InputAction::None;
    }

    handle_dialog_key(app, key)
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) -> InputAction {
    let ctx = app.context().clone();
    let focus = app
        .dialog()
        .state()
        .form()
        .map(|form| form.focus)
        .unwrap_or_default();
    let dialog = app.dialog_mut();

    match key.code {
        KeyCode::Esc => dialog.close_dialog(),
        KeyCode::Tab => dialog.focus_next(),
        KeyCode::BackTab => dialog.focus_prev(),
        KeyCode::Up => dialog.move_highlight(&ctx, -1),
        KeyCode::Down => dialog.move_highlight(&ctx, 1),
        KeyCode::Delete => dialog.clear_selection(),
        KeyCode::Backspace => dialog.backspace_query(),
        KeyCode::Enter => match focus {
            DialogFocus::Picker => dialog.pick_highlighted(&ctx),
            DialogFocus::Cancel => dialog.close_dialog(),
            DialogFocus::Save => {
                if let Some(pending) = dialog.begin_save() {
                    return InputAction::Save(pending);
                }
            }
        },
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            dialog.type_query(ch)
        }
        _ => {}
    }
    InputAction::None
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
