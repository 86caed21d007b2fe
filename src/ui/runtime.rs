use crate::ui::app::App;
use crate::ui::device_dialog::PendingSave;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Run the TUI until the user quits. Save callbacks run on `runtime`.
pub fn run(mut app: App, tick_rate: Duration, runtime: Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(tick_rate);

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => {
                if let InputAction::Save(pending) = handle_key(&mut app, key) {
                    spawn_save(&runtime, pending, events.sender());
                }
            }
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(cols, rows)) => {
                tracing::trace!(cols, rows, "Terminal resized");
            }
            Ok(AppEvent::SaveFinished {
                generation,
                device,
                result,
            }) => app.on_save_finished(generation, device, result),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        app.drain_dialog_events();
    }

    drop(guard);
    Ok(())
}

fn spawn_save(runtime: &Handle, pending: PendingSave, tx: mpsc::Sender<AppEvent>) {
    let PendingSave {
        generation,
        device,
        future,
    } = pending;
    runtime.spawn(async move {
        let result = future.await;
        if tx
            .send(AppEvent::SaveFinished {
                generation,
                device,
                result,
            })
            .is_err()
        {
            tracing::debug!(generation, "UI exited before save finished");
        }
    });
}
