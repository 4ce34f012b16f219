//! Key handling.
//!
//! Maps key presses to form events. Only focus and the cursor position live
//! here; field values are always read from the [`FormView`] and changed by
//! sending [`FormEvent::Edit`] to the controller.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use signup_lib::{Field, FormEvent, FormView};

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(Field),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::Input(Field::FirstName),
        Focus::Input(Field::LastName),
        Focus::Input(Field::Email),
        Focus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Presentation-only state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub focus: Focus,
    /// Cursor position in the focused input, in chars.
    pub cursor: usize,
    /// Current frame of the pending spinner.
    pub spinner_frame: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::Input(Field::FirstName),
            cursor: 0,
            spinner_frame: 0,
        }
    }
}

/// What the event loop should do with a key press.
#[derive(Debug)]
pub enum Action {
    Form(FormEvent),
    Quit,
    None,
}

/// Translates a key press into an [`Action`], updating focus and cursor.
pub fn handle_key(key: KeyEvent, ui: &mut UiState, view: &FormView) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => return Action::Quit,
        KeyCode::Esc => {
            return if view.error_banner.is_some() {
                Action::Form(FormEvent::DismissError)
            } else if view.success_banner.is_some() {
                Action::Form(FormEvent::DismissSuccess)
            } else {
                Action::None
            };
        }
        KeyCode::Tab | KeyCode::Down => {
            move_focus(ui, ui.focus.next(), view);
            return Action::None;
        }
        KeyCode::BackTab | KeyCode::Up => {
            move_focus(ui, ui.focus.prev(), view);
            return Action::None;
        }
        KeyCode::Enter => return Action::Form(FormEvent::Submit),
        _ => {}
    }

    let Focus::Input(field) = ui.focus else {
        return Action::None;
    };
    if view.is_disabled() {
        return Action::None;
    }

    let value = view.fields.get(field);
    let len = value.chars().count();
    ui.cursor = ui.cursor.min(len);

    match key.code {
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut value = value.to_string();
            value.insert(byte_index(&value, ui.cursor), c);
            ui.cursor += 1;
            Action::Form(FormEvent::Edit(field, value))
        }
        KeyCode::Backspace if ui.cursor > 0 => {
            let mut value = value.to_string();
            value.remove(byte_index(&value, ui.cursor - 1));
            ui.cursor -= 1;
            Action::Form(FormEvent::Edit(field, value))
        }
        KeyCode::Delete if ui.cursor < len => {
            let mut value = value.to_string();
            value.remove(byte_index(&value, ui.cursor));
            Action::Form(FormEvent::Edit(field, value))
        }
        KeyCode::Left => {
            ui.cursor = ui.cursor.saturating_sub(1);
            Action::None
        }
        KeyCode::Right => {
            ui.cursor = (ui.cursor + 1).min(len);
            Action::None
        }
        KeyCode::Home => {
            ui.cursor = 0;
            Action::None
        }
        KeyCode::End => {
            ui.cursor = len;
            Action::None
        }
        _ => Action::None,
    }
}

/// Moves focus to the first field with an inline error, if any.
pub fn focus_first_error(ui: &mut UiState, view: &FormView) {
    if let Some((field, _)) = view.errors.iter().next() {
        move_focus(ui, Focus::Input(field), view);
    }
}

fn move_focus(ui: &mut UiState, focus: Focus, view: &FormView) {
    ui.focus = focus;
    ui.cursor = match focus {
        Focus::Input(field) => view.fields.get(field).chars().count(),
        Focus::Submit => 0,
    };
}

/// Byte offset of the `index`th char.
fn byte_index(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map(|(i, _)| i).unwrap_or(s.len())
}
