//! Rendering for the device dialog.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::context::HostContext;
use crate::ui::layout::centered_rect_by_size;
use crate::ui::picker::{PickerFilter, MAX_VISIBLE_MATCHES};
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, ENERGY_ACCENT, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER, STATUS_ERROR,
};

use super::state::{DeviceDialogState, DeviceForm, DialogFocus};

const DIALOG_WIDTH: u16 = 60;

/// Render the device dialog overlay. Does nothing while closed.
pub fn render_device_dialog(
    frame: &mut Frame,
    state: &DeviceDialogState,
    ctx: &HostContext,
    filter: &PickerFilter,
) {
    let Some(form) = state.form() else {
        return;
    };

    let lines = dialog_lines(form, state.can_save(), ctx, filter);
    let height = lines.len() as u16 + 2;
    let area = centered_rect_by_size(DIALOG_WIDTH, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" ⚡ ", Style::default().fg(ENERGY_ACCENT)),
            Span::styled("Add a device ", Style::default().fg(HEADER_TEXT)),
        ]))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn dialog_lines(
    form: &DeviceForm,
    can_save: bool,
    ctx: &HostContext,
    filter: &PickerFilter,
) -> Vec<Line<'static>> {
    let text = Style::default().fg(HEADER_TEXT);
    let dim = Style::default().fg(HEADER_SEPARATOR);
    let inner_width = DIALOG_WIDTH.saturating_sub(2) as usize;

    let mut lines = vec![Line::from("")];

    // The failure message is shown in full, wrapped to the dialog width.
    if let Some(error) = &form.error {
        for row in wrap(error, inner_width.saturating_sub(4)) {
            lines.push(Line::from(Span::styled(
                format!("  {}", row),
                Style::default().fg(STATUS_ERROR),
            )));
        }
        lines.push(Line::from(""));
    }

    let label_style = if form.focus == DialogFocus::Picker {
        Style::default().fg(ENERGY_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        text
    };
    lines.push(Line::from(Span::styled(
        format!("  Device consumption energy ({})", filter.unit_label()),
        label_style,
    )));

    let query = form.picker.query();
    lines.push(Line::from(vec![
        Span::styled("  › ", Style::default().fg(ENERGY_ACCENT)),
        if query.is_empty() {
            Span::styled("type to search statistics", dim)
        } else {
            Span::styled(query.to_string(), text)
        },
    ]));

    let matches = form.picker.matches(ctx.statistics(), filter);
    if matches.is_empty() {
        lines.push(Line::from(Span::styled("    No matching statistics", dim)));
    }
    for (index, stat) in matches.iter().take(MAX_VISIBLE_MATCHES).enumerate() {
        let highlighted = index == form.picker.highlighted();
        let chosen = form.picker.value() == Some(stat.statistic_id.as_str());
        let marker = match (highlighted, chosen) {
            (_, true) => "  ✓ ",
            (true, false) => "  ▸ ",
            (false, false) => "    ",
        };
        let style = if highlighted {
            text.bg(ACTIVE_HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else {
            text
        };
        let name = truncate(stat.display_name(), inner_width.saturating_sub(6));
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(ENERGY_ACCENT)),
            Span::styled(name, style),
        ]));
    }
    if matches.len() > MAX_VISIBLE_MATCHES {
        lines.push(Line::from(Span::styled(
            format!("    … {} more", matches.len() - MAX_VISIBLE_MATCHES),
            dim,
        )));
    }

    lines.push(Line::from(""));
    lines.push(match form.picker.value() {
        Some(value) => Line::from(vec![
            Span::styled("  Selected: ", dim),
            Span::styled(truncate(value, inner_width.saturating_sub(14)), text),
        ]),
        None => Line::from(Span::styled("  Selected: none", dim)),
    });

    lines.push(Line::from(""));
    lines.push(render_buttons(form.focus, can_save, ctx, inner_width));
    lines
}

/// Cancel and Save, right-aligned. Save is dimmed while disabled.
fn render_buttons(
    focus: DialogFocus,
    can_save: bool,
    ctx: &HostContext,
    inner_width: usize,
) -> Line<'static> {
    let button_style = |focused: bool, enabled: bool| {
        let base = if enabled {
            Style::default().fg(HEADER_TEXT)
        } else {
            Style::default()
                .fg(HEADER_SEPARATOR)
                .add_modifier(Modifier::DIM)
        };
        if focused {
            base.bg(ACTIVE_HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else {
            base
        }
    };

    let cancel = format!(" {} ", ctx.localize("ui.common.cancel"));
    let save = format!(" {} ", ctx.localize("ui.common.save"));
    let used = cancel.chars().count() + save.chars().count() + 4;
    let padding = inner_width.saturating_sub(used);

    Line::from(vec![
        Span::raw(" ".repeat(padding)),
        Span::styled(cancel, button_style(focus == DialogFocus::Cancel, true)),
        Span::raw("  "),
        Span::styled(save, button_style(focus == DialogFocus::Save, can_save)),
        Span::raw("  "),
    ])
}

/// Split `text` into rows of at most `width` characters, breaking at
/// spaces where possible and inside words only when a word is too long.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;

    for word in text.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        let sep = usize::from(row_len > 0);
        if row_len + sep + word.len() > width && row_len > 0 {
            rows.push(std::mem::take(&mut row));
            row_len = 0;
        } else if row_len > 0 {
            row.push(' ');
            row_len += 1;
        }
        while word.len() > width {
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        row_len += word.len();
        row.extend(word);
    }
    rows.push(row);
    rows
}

/// Truncate to `max_chars` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::{DeviceConsumptionEnergyPreference, StatisticMetadata};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::collections::HashMap;

    fn context() -> HostContext {
        HostContext::new(
            HashMap::new(),
            vec![
                StatisticMetadata::new("sensor.fridge_energy", Some("kWh")).with_name("Fridge"),
                StatisticMetadata::new("sensor.heater_energy", Some("kWh")),
            ],
        )
    }

    fn render(state: &DeviceDialogState, ctx: &HostContext) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_device_dialog(frame, state, ctx, &PickerFilter::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn closed_dialog_renders_nothing() {
        let text = render(&DeviceDialogState::Closed, &context());
        assert!(text.trim().is_empty());
    }

    #[test]
    fn open_dialog_shows_heading_picker_and_buttons() {
        let state = DeviceDialogState::Open(DeviceForm::default());
        let text = render(&state, &context());

        assert!(text.contains("Add a device"));
        assert!(text.contains("Device consumption energy (kWh)"));
        assert!(text.contains("Fridge"));
        assert!(text.contains("sensor.heater_energy"));
        assert!(text.contains("Cancel"));
        assert!(text.contains("Save"));
        assert!(text.contains("Selected: none"));
    }

    #[test]
    fn error_is_shown_above_picker() {
        let form = DeviceForm {
            device: Some(DeviceConsumptionEnergyPreference::new("sensor.fridge_energy")),
            error: Some("Recorder unavailable".to_string()),
            ..DeviceForm::default()
        };
        let text = render(&DeviceDialogState::Open(form), &context());

        let error_at = text.find("Recorder unavailable").unwrap();
        let label_at = text.find("Device consumption energy").unwrap();
        assert!(error_at < label_at);
    }

    #[test]
    fn long_error_is_wrapped_not_cut() {
        let message = "Statistic 'sensor.kettle_energy' is already used by another device";
        let form = DeviceForm {
            device: Some(DeviceConsumptionEnergyPreference::new("sensor.kettle_energy")),
            error: Some(message.to_string()),
            ..DeviceForm::default()
        };
        let text = render(&DeviceDialogState::Open(form), &context());

        let joined = text
            .lines()
            .map(|line| line.trim_matches(|c: char| c == ' ' || c == '│'))
            .collect::<Vec<_>>()
            .join(" ");
        assert!(!text.contains('…'));
        assert!(joined.contains(message));
        assert!(text.contains("Cancel"));
    }

    #[test]
    fn wrap_breaks_at_spaces_and_splits_long_words() {
        assert_eq!(wrap("short", 10), vec!["short"]);
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 4), vec![""]);
    }

    #[test]
    fn buttons_use_localized_labels() {
        let mut translations = HashMap::new();
        translations.insert("ui.common.save".to_string(), "Speichern".to_string());
        translations.insert("ui.common.cancel".to_string(), "Abbrechen".to_string());
        let ctx = HostContext::new(translations, Vec::new());

        let text = render(&DeviceDialogState::Open(DeviceForm::default()), &ctx);
        assert!(text.contains("Speichern"));
        assert!(text.contains("Abbrechen"));
        assert!(text.contains("No matching statistics"));
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("sensor.very_long_name", 8), "sensor.…");
        assert_eq!(truncate("ääää", 3), "ää…");
    }
}
