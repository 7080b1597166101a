//! Staff rendering
//!
//! Features:
//! - Pure text layout of a five-line staff with one whole note
//! - Ledger lines (up to two) above and below the staff
//! - `NotationRenderer` seam so the quiz never touches drawing directly
//! - Crossterm-backed terminal implementation

use crate::notation::pitch::{Clef, Letter, Pitch};
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::error::Error;
use std::io::{stdout, Write};

/// Rows in the staff viewport: staff steps +12 (top) down to -4 (bottom),
/// one terminal row per step.
pub const STAFF_ROWS: usize = 17;
/// Viewport width in columns
pub const STAFF_WIDTH: usize = 28;
/// Column the note is centered on
const NOTE_COL: usize = 16;
/// Column the clef glyph sits on
const CLEF_COL: usize = 3;
/// Topmost step shown (two ledger lines above the staff)
const TOP_STEP: i32 = 12;

/// Draws one whole note on a staff, replacing whatever was drawn before.
///
/// Implementations must fully clear their viewport before redrawing so stale
/// notes never accumulate.
pub trait NotationRenderer {
    fn draw(&mut self, clef: Clef, pitch: Pitch) -> Result<(), Box<dyn Error>>;
}

/// Staff step of a pitch relative to the clef's bottom line
fn step_of(clef: Clef, pitch: Pitch) -> i32 {
    pitch.diatonic() - clef.bottom_line()
}

/// Viewport row of a pitch (0 = top row)
fn row_of(clef: Clef, pitch: Pitch) -> usize {
    (TOP_STEP - step_of(clef, pitch)) as usize
}

/// Staff step the clef glyph is anchored to (its reference line)
fn clef_anchor(clef: Clef) -> i32 {
    let reference = match clef {
        Clef::Treble => Pitch::new(Letter::G, 4),
        Clef::Bass => Pitch::new(Letter::F, 3),
        Clef::Alto | Clef::Tenor => Pitch::new(Letter::C, 4),
    };
    step_of(clef, reference)
}

fn clef_glyph(clef: Clef) -> char {
    match clef {
        Clef::Treble => '𝄞',
        Clef::Bass => '𝄢',
        Clef::Alto | Clef::Tenor => '𝄡',
    }
}

/// Lay out the staff as fixed-size text rows.
///
/// Staff lines sit on even steps 0..=8. Ledger lines (steps -2, -4, 10, 12)
/// appear only when the note reaches them, as short segments under the note.
pub fn layout(clef: Clef, pitch: Pitch) -> Vec<String> {
    let note_step = step_of(clef, pitch);
    let anchor = clef_anchor(clef);

    let mut rows = Vec::with_capacity(STAFF_ROWS);
    for row in 0..STAFF_ROWS {
        let step = TOP_STEP - row as i32;
        let mut chars: Vec<char> = if (0..=8).contains(&step) && step % 2 == 0 {
            vec!['─'; STAFF_WIDTH]
        } else {
            vec![' '; STAFF_WIDTH]
        };

        // Ledger segment when the note sits on or beyond this ledger step
        let ledger_active = match step {
            10 | 12 => note_step >= step,
            -2 | -4 => note_step <= step,
            _ => false,
        };
        if ledger_active {
            for col in NOTE_COL - 2..=NOTE_COL + 2 {
                chars[col] = '─';
            }
        }

        if step == anchor {
            chars[CLEF_COL] = clef_glyph(clef);
        }
        if step == note_step {
            chars[NOTE_COL] = '○';
        }

        rows.push(chars.into_iter().collect());
    }
    rows
}

/// Terminal staff view at a fixed origin
pub struct TerminalStaff {
    origin_row: u16,
    origin_col: u16,
}

impl TerminalStaff {
    pub fn new(origin_row: u16, origin_col: u16) -> Self {
        TerminalStaff {
            origin_row,
            origin_col,
        }
    }
}

impl NotationRenderer for TerminalStaff {
    fn draw(&mut self, clef: Clef, pitch: Pitch) -> Result<(), Box<dyn Error>> {
        let mut stdout = stdout();
        let note_row = row_of(clef, pitch);

        for (i, row) in layout(clef, pitch).iter().enumerate() {
            // MoveTo + full-width row overwrites the previous frame's content
            execute!(
                stdout,
                cursor::MoveTo(self.origin_col, self.origin_row + i as u16),
                SetForegroundColor(if i == note_row {
                    Color::Yellow
                } else {
                    Color::Grey
                }),
                Print(row),
                ResetColor
            )?;
        }
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_cells(rows: &[String]) -> Vec<(usize, usize)> {
        rows.iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, c)| c == '○')
                    .map(move |(col, _)| (r, col))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_every_allowed_note_fits_the_viewport() {
        for clef in Clef::ALL {
            for &pitch in clef.range() {
                let rows = layout(clef, pitch);
                assert_eq!(rows.len(), STAFF_ROWS);
                let cells = note_cells(&rows);
                assert_eq!(cells.len(), 1, "{} on {} drawn once", pitch, clef);
                assert_eq!(cells[0], (row_of(clef, pitch), 16));
            }
        }
    }

    #[test]
    fn test_five_staff_lines_always_present() {
        // Line rows run edge to edge; the clef glyph and note only ever
        // overwrite interior columns.
        let rows = layout(Clef::Treble, Pitch::new(Letter::C, 5));
        let full_lines = rows
            .iter()
            .filter(|row| row.starts_with('─') && row.ends_with('─'))
            .count();
        assert_eq!(full_lines, 5);
    }

    #[test]
    fn test_ledger_lines_only_when_reached() {
        // c/4 below the treble staff needs one ledger line (step -2)
        let rows = layout(Clef::Treble, Pitch::new(Letter::C, 4));
        let ledger_row = (TOP_STEP - (-2)) as usize;
        assert!(rows[ledger_row].contains('─'));

        // f/4 sits inside the staff, so no ledger segment anywhere
        let rows = layout(Clef::Treble, Pitch::new(Letter::F, 4));
        let ledger_rows = [14, 16, 2, 0];
        for r in ledger_rows {
            assert!(
                !rows[r].contains('─'),
                "unexpected ledger segment in row {}",
                r
            );
        }
    }

    #[test]
    fn test_clef_glyph_on_reference_line() {
        let rows = layout(Clef::Treble, Pitch::new(Letter::C, 5));
        // Treble glyph anchors on the G4 line, step 2 from the bottom
        let glyph_row = (TOP_STEP - 2) as usize;
        assert!(rows[glyph_row].contains('𝄞'));

        let rows = layout(Clef::Bass, Pitch::new(Letter::C, 3));
        let glyph_row = (TOP_STEP - 6) as usize;
        assert!(rows[glyph_row].contains('𝄢'));
    }

    #[test]
    fn test_middle_c_on_first_ledger_below_treble() {
        let pitch = Pitch::new(Letter::C, 4);
        assert_eq!(step_of(Clef::Treble, pitch), -2);
        let rows = layout(Clef::Treble, pitch);
        let row = &rows[row_of(Clef::Treble, pitch)];
        // Note overdraws the center of its own ledger segment
        assert_eq!(row.chars().nth(16), Some('○'));
        assert_eq!(row.chars().nth(15), Some('─'));
    }
}
