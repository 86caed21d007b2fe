use crate::ui::app::App;
use crate::ui::device_dialog::render_device_dialog;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::theme::{HEADER_SEPARATOR, HEADER_TEXT, STATUS_OK};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let devices = app.devices();

    frame.render_widget(Header::new().widget(devices.len()), header);
    frame.render_widget(Clear, body);

    let mut lines = vec![Line::from("")];
    if devices.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No devices tracked yet. Press A to add one.",
            Style::default().fg(HEADER_SEPARATOR),
        )));
    }
    for device in &devices {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(HEADER_SEPARATOR)),
            Span::styled(
                device.stat_consumption.clone(),
                Style::default().fg(HEADER_TEXT),
            ),
        ]));
    }
    if let Some(status) = app.status() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", status),
            Style::default().fg(STATUS_OK),
        )));
    }
    frame.render_widget(Paragraph::new(lines), body);

    frame.render_widget(
        Footer::new().widget(footer, app.dialog().is_open()),
        footer,
    );

    let dialog = app.dialog();
    render_device_dialog(frame, dialog.state(), app.context(), dialog.filter());
}
