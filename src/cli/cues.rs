//! Feedback cues
//!
//! Fire-and-forget signals for correct / wrong / level-up events. The
//! terminal implementation rings the bell; playback errors are ignored and
//! overlapping cues are fine.

use crate::quiz::state::Cue;
use std::io::{stdout, Write};

/// Sink for feedback cues
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Terminal bell cues
pub struct TerminalCues {
    quiet: bool,
}

impl TerminalCues {
    pub fn new(quiet: bool) -> Self {
        TerminalCues { quiet }
    }

    fn ring(&self, times: usize) {
        if self.quiet {
            return;
        }
        let mut stdout = stdout();
        for _ in 0..times {
            let _ = stdout.write_all(b"\x07");
        }
        let _ = stdout.flush();
    }
}

impl CueSink for TerminalCues {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Correct => self.ring(1),
            Cue::Wrong => self.ring(1),
            Cue::LevelUp => self.ring(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records played cues instead of making noise
    pub struct Recording(pub Vec<Cue>);

    impl CueSink for Recording {
        fn play(&mut self, cue: Cue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_sink_receives_cues_in_order() {
        let mut sink = Recording(Vec::new());
        sink.play(Cue::Correct);
        sink.play(Cue::LevelUp);
        assert_eq!(sink.0, vec![Cue::Correct, Cue::LevelUp]);
    }
}
