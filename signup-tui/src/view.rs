//! Rendering.
//!
//! `render` is a pure function of the form snapshot and the UI state. It
//! produces styled lines; the terminal module draws them.

use signup_lib::{Field, FormView, SubmissionStatus};

use crate::input::{Focus, UiState};

pub const TITLE: &str = "Create User";
pub const SUBMIT_LABEL: &str = "Create User";
pub const PENDING_LABEL: &str = "Creating User...";
pub const HELP: &str = "Tab/Shift+Tab move · Enter submit · Esc dismiss · Ctrl+C quit";

/// Braille spinner frames shown while a submission is pending.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Width of an input box's text area, in columns.
const INPUT_WIDTH: usize = 36;

/// Semantic color of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Title,
    Muted,
    Focused,
    Disabled,
    Error,
    Success,
    /// Character under the cursor (drawn reversed).
    Cursor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One row of output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::new(text, tone)],
        }
    }

    fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.spans.push(Span::new(text, tone));
        self
    }

    /// Concatenated text without styling.
    #[cfg(test)]
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Renders the whole form.
pub fn render(view: &FormView, ui: &UiState) -> Vec<Line> {
    let mut lines = vec![Line::text(TITLE, Tone::Title), Line::blank()];

    if let Some(message) = &view.error_banner {
        lines.push(
            Line::text(format!("✗ {}", message), Tone::Error).push("  (Esc to dismiss)", Tone::Muted),
        );
        lines.push(Line::blank());
    }
    if let Some(message) = &view.success_banner {
        lines.push(
            Line::text(format!("✓ {}", message), Tone::Success).push("  (Esc to dismiss)", Tone::Muted),
        );
        lines.push(Line::blank());
    }

    for field in Field::ALL {
        render_input(&mut lines, view, ui, field);
    }

    lines.push(render_submit(view, ui));
    lines.push(Line::blank());
    lines.push(Line::text(HELP, Tone::Muted));
    lines
}

fn render_input(lines: &mut Vec<Line>, view: &FormView, ui: &UiState, field: Field) {
    let focused = ui.focus == Focus::Input(field);
    let disabled = view.is_disabled();
    let error = view.errors.get(field);

    let label_tone = if error.is_some() {
        Tone::Error
    } else if disabled {
        Tone::Disabled
    } else if focused {
        Tone::Focused
    } else {
        Tone::Normal
    };
    let mut label = Line::text(field.label(), label_tone);
    if field == Field::Email {
        label = label.push(" (email)", Tone::Muted);
    }
    lines.push(label);

    let marker = if focused { "▸ " } else { "  " };
    let value = view.fields.get(field);
    let value_tone = if disabled { Tone::Disabled } else { Tone::Normal };
    let mut input = Line::text(marker, Tone::Focused).push("[", Tone::Muted);

    if focused && !disabled {
        let chars: Vec<char> = value.chars().collect();
        let cursor = ui.cursor.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
        let after: String = chars.get(cursor + 1..).map(|rest| rest.iter().collect()).unwrap_or_default();
        let used = chars.len().max(cursor + 1);
        input = input
            .push(before, value_tone)
            .push(at, Tone::Cursor)
            .push(after, value_tone)
            .push(" ".repeat(INPUT_WIDTH.saturating_sub(used)), value_tone);
    } else {
        let used = value.chars().count();
        input = input
            .push(value, value_tone)
            .push(" ".repeat(INPUT_WIDTH.saturating_sub(used)), value_tone);
    }
    lines.push(input.push("]", Tone::Muted));

    match error {
        Some(message) => lines.push(Line::text(format!("  {}", message), Tone::Error)),
        None => lines.push(Line::blank()),
    }
}

fn render_submit(view: &FormView, ui: &UiState) -> Line {
    let focused = ui.focus == Focus::Submit;
    let marker = if focused { "▸ " } else { "  " };
    let line = Line::text(marker, Tone::Focused);

    match view.status {
        SubmissionStatus::Pending => {
            let frame = SPINNER_FRAMES[ui.spinner_frame % SPINNER_FRAMES.len()];
            line.push(format!("[ {} {} ]", frame, PENDING_LABEL), Tone::Disabled)
        }
        SubmissionStatus::Succeeded => line.push(format!("[ {} ]", SUBMIT_LABEL), Tone::Disabled),
        SubmissionStatus::Idle => {
            let tone = if focused { Tone::Focused } else { Tone::Normal };
            line.push(format!("[ {} ]", SUBMIT_LABEL), tone)
        }
    }
}
