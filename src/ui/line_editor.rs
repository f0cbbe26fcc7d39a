use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press did to the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Edited,
    Submitted(String),
    Quit,
    Ignored,
}

/// The half-typed command. The terminal runs in raw mode, so the line lives
/// here and is reprinted whenever the status line is redrawn.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

pub fn should_quit(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LineEvent {
        if should_quit(key) {
            return LineEvent::Quit;
        }
        match key.code {
            KeyCode::Enter => LineEvent::Submitted(std::mem::take(&mut self.buffer)),
            KeyCode::Backspace => match self.buffer.pop() {
                Some(_) => LineEvent::Edited,
                None => LineEvent::Ignored,
            },
            KeyCode::Esc if !self.buffer.is_empty() => {
                self.buffer.clear();
                LineEvent::Edited
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.push(c);
                LineEvent::Edited
            }
            _ => LineEvent::Ignored,
        }
    }
}
