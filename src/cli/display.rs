//! Terminal display and UI rendering
//!
//! Features:
//! - Clef picker, answer-key row, and feedback line
//! - Level / star progress and persisted accuracy summary
//! - Level-up banner overlay
//!
//! The staff itself is drawn by the `NotationRenderer` at `STAFF_ROW`; the
//! shell renders everything around it and holds no quiz logic.

#[allow(unused_imports)]
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

use crate::notation::pitch::{Clef, Letter};
use crate::notation::staff::STAFF_ROWS;
use crate::quiz::state::QuizState;

/// Row the staff viewport starts on
pub const STAFF_ROW: u16 = 4;
/// Column the staff viewport starts on
pub const STAFF_COL: u16 = 2;

const ANSWERS_ROW: u16 = STAFF_ROW + STAFF_ROWS as u16 + 1;
const MESSAGE_ROW: u16 = ANSWERS_ROW + 2;
const PROGRESS_ROW: u16 = MESSAGE_ROW + 2;
const SUMMARY_ROW: u16 = PROGRESS_ROW + 1;
const BANNER_ROW: u16 = SUMMARY_ROW + 2;
const HELP_ROW: u16 = BANNER_ROW + 2;

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Create display without alternate screen (simpler mode)
    pub fn simple() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display {
            use_alternate_screen: false,
        })
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide
        )?;
        Ok(())
    }

    /// Render the title line
    pub fn show_title(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print("🎵 Note Read Trainer"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the clef picker with the active clef highlighted
    pub fn show_clefs(&self, active: Clef) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(stdout, cursor::MoveTo(0, 2), Print("Clef: "))?;

        for (i, clef) in Clef::ALL.into_iter().enumerate() {
            let label = format!("[{}] {}  ", i + 1, clef.name());
            if clef == active {
                execute!(
                    stdout,
                    SetForegroundColor(Color::Cyan),
                    Print(label),
                    ResetColor
                )?;
            } else {
                execute!(
                    stdout,
                    SetForegroundColor(Color::DarkGrey),
                    Print(label),
                    ResetColor
                )?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    /// Render the seven answer keys
    pub fn show_answers(&self, locked: bool) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(STAFF_COL, ANSWERS_ROW),
            SetForegroundColor(if locked {
                Color::DarkGrey
            } else {
                Color::White
            })
        )?;
        for letter in Letter::ALL {
            execute!(stdout, Print(format!(" {} ", letter.as_char())))?;
        }
        execute!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the feedback message line
    pub fn show_message(&self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(STAFF_COL, MESSAGE_ROW),
            terminal::Clear(ClearType::CurrentLine),
            Print(message)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render session progress and the persisted summary
    pub fn show_progress(&self, state: &QuizState) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        let stars = "⭐".repeat(state.stars as usize);
        execute!(
            stdout,
            cursor::MoveTo(STAFF_COL, PROGRESS_ROW),
            SetForegroundColor(Color::Magenta),
            Print("Level: "),
            ResetColor,
            Print(format!("{}", state.level())),
            Print("  |  "),
            Print(format!("Stars: {} {}", state.stars, stars)),
            Print(format!("  |  Session: {} correct", state.correct_count)),
        )?;

        let accuracy = state.stats.accuracy_display();
        execute!(
            stdout,
            cursor::MoveTo(STAFF_COL, SUMMARY_ROW),
            SetForegroundColor(Color::Magenta),
            Print("Total: "),
            ResetColor,
            Print(format!("{}", state.stats.total)),
            Print("  |  Accuracy: "),
            SetForegroundColor(accuracy_color(&state.stats)),
            Print(accuracy),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the level-up banner overlay
    pub fn show_banner(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(STAFF_COL, BANNER_ROW),
            SetForegroundColor(Color::Yellow),
            Print("🎉 Level Up! New stage unlocked!"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show help text
    pub fn show_help(&self, awaiting_continue: bool) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        let help = if awaiting_continue {
            "Press SPACE to continue  |  Esc to exit"
        } else {
            "A-G answer  |  1-4/Tab clef  |  R reset stats  |  Esc to exit"
        };
        execute!(
            stdout,
            cursor::MoveTo(0, HELP_ROW),
            SetForegroundColor(Color::DarkGrey),
            Print(help),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        if self.use_alternate_screen {
            execute!(stdout, LeaveAlternateScreen)?;
        }
        execute!(stdout, cursor::Show)?;

        terminal::disable_raw_mode()?;
        Ok(())
    }
}

fn accuracy_color(stats: &crate::quiz::stats::StatsRecord) -> Color {
    if stats.total == 0 {
        return Color::White;
    }
    let ratio = stats.correct as f64 / stats.total as f64;
    if ratio > 0.9 {
        Color::Green
    } else if ratio > 0.8 {
        Color::Yellow
    } else {
        Color::Red
    }
}

impl Default for Display {
    fn default() -> Self {
        // Return simple display that doesn't use alternate screen
        Display {
            use_alternate_screen: false,
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
