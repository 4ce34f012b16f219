//! Main event loop.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures::StreamExt;
use log::{debug, info, trace};
use signup_lib::{FormController, FormEvent};

use crate::error::AppError;
use crate::input::{self, Action, UiState};
use crate::terminal::TerminalGuard;
use crate::view;

/// Spinner frame duration while a submission is pending.
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

enum Next {
    Terminal(CrosstermEvent),
    Form(FormEvent),
    Tick,
}

/// Runs the form until the user quits.
///
/// Terminal input and the controller's own events (network completion,
/// banner expiry) are handled one at a time on this task.
pub async fn run(mut controller: FormController) -> Result<(), AppError> {
    let mut terminal = TerminalGuard::new()?;
    let mut events = EventStream::new();
    let mut ui = UiState::default();
    let mut spinner = tokio::time::interval(SPINNER_INTERVAL);

    info!("Form ready");

    loop {
        let form = controller.view();
        terminal.draw(&view::render(&form, &ui))?;
        let pending = form.status.is_pending();

        let next = tokio::select! {
            maybe = events.next() => match maybe {
                Some(Ok(event)) => Next::Terminal(event),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    debug!("Terminal event stream closed");
                    return Ok(());
                }
            },
            Some(event) = controller.next_event() => Next::Form(event),
            _ = spinner.tick(), if pending => Next::Tick,
        };

        match next {
            Next::Terminal(CrosstermEvent::Key(key)) => {
                trace!("Key: {:?}", key);
                match input::handle_key(key, &mut ui, &form) {
                    Action::Form(FormEvent::Submit) => {
                        controller.handle(FormEvent::Submit);
                        input::focus_first_error(&mut ui, &controller.view());
                    }
                    Action::Form(event) => controller.handle(event),
                    Action::Quit => {
                        info!("Quit requested");
                        return Ok(());
                    }
                    Action::None => {}
                }
            }
            // Resize and the rest just trigger a redraw.
            Next::Terminal(_) => {}
            Next::Form(event) => controller.handle(event),
            Next::Tick => ui.spinner_frame = ui.spinner_frame.wrapping_add(1),
        }
    }
}
