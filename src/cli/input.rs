//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture (the poll timeout doubles as the
//!   tick source for timed advances)
//! - Answer letters, clef selection, continue, reset, and exit keys

use crate::notation::pitch::{Clef, Letter};
use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations (milliseconds)
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for keystroke with timeout (non-blocking)
    /// Returns Some(KeyEvent) if key pressed, None if timeout
    pub fn read_key(&self) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                event::Event::Key(key_event) => Ok(Some(key_event)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Check if key event is an exit signal (Ctrl+C or Escape)
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Map a key to an answer letter (a-g, either case, no modifiers)
    pub fn answer_letter(key: &KeyEvent) -> Option<Letter> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => Letter::from_char(c),
            _ => None,
        }
    }

    /// Map a digit key (1-4) to a clef
    pub fn clef_choice(key: &KeyEvent) -> Option<Clef> {
        match key.code {
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                Some(Clef::ALL[idx])
            }
            _ => None,
        }
    }

    /// Check if key cycles to the next clef
    pub fn is_clef_cycle(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Tab)
    }

    /// Check if key continues a revealed round (manual advance)
    pub fn is_continue(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
    }

    /// Check if key resets the statistics
    pub fn is_reset(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
