//! Quiz state machine
//!
//! Maintains:
//! - The active clef and note, wrong-attempt count, feedback message
//! - Input lock and pending timed advance for resolved rounds
//! - Session progress (correct count, stars) and the statistics record
//!
//! Transitions never perform I/O themselves: each returns an `Outcome`
//! naming the cues to play and whether statistics or the staff changed,
//! and the event loop runs those effects.

use crate::notation::pitch::{Clef, Pitch};
use crate::quiz::picker::NotePicker;
use crate::quiz::stats::StatsRecord;
use clap::ValueEnum;
use std::time::{Duration, Instant};

/// Wrong attempts allowed before the answer is revealed
pub const MAX_ATTEMPTS: u8 = 3;
/// Correct answers per star
pub const CORRECT_PER_STAR: u32 = 15;
/// Delay before the next note after a correct answer
pub const ADVANCE_AFTER_CORRECT: Duration = Duration::from_secs(1);
/// Delay before the next note after the answer was revealed (auto policy)
pub const ADVANCE_AFTER_REVEAL: Duration = Duration::from_secs(2);
/// How long the level-up banner stays up
pub const BANNER_HOLD: Duration = Duration::from_millis(2500);

/// How a revealed (three-times-missed) round moves on
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AdvancePolicy {
    /// Advance on its own after a short delay
    Auto,
    /// Wait for an explicit continue key
    Manual,
}

/// Feedback cue kinds, forwarded to the cue sink
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Wrong,
    LevelUp,
}

/// Effects requested by a transition
#[derive(Debug, Default)]
pub struct Outcome {
    pub cues: Vec<Cue>,
    /// Statistics changed and should be persisted
    pub stats_changed: bool,
    /// The active note or clef changed and the staff must redraw
    pub staff_changed: bool,
}

/// Complete quiz state
pub struct QuizState {
    pub clef: Clef,
    pub pitch: Pitch,
    /// Wrong attempts this round (0..=MAX_ATTEMPTS)
    pub attempts: u8,
    pub message: String,
    /// Answers are ignored while locked (resolved round)
    pub locked: bool,
    /// Correct answers this session
    pub correct_count: u32,
    pub stars: u32,
    pub stats: StatsRecord,
    pub banner_visible: bool,
    policy: AdvancePolicy,
    pending_advance: Option<Instant>,
    banner_until: Option<Instant>,
    picker: NotePicker,
}

impl QuizState {
    /// Create a session on the given clef with a freshly picked note
    pub fn new(clef: Clef, mut picker: NotePicker, stats: StatsRecord, policy: AdvancePolicy) -> Self {
        let pitch = picker.pick(clef);
        QuizState {
            clef,
            pitch,
            attempts: 0,
            message: String::new(),
            locked: false,
            correct_count: 0,
            stars: 0,
            stats,
            banner_visible: false,
            policy,
            pending_advance: None,
            banner_until: None,
            picker,
        }
    }

    /// Current level, derived from session correct count
    pub fn level(&self) -> u32 {
        self.correct_count / CORRECT_PER_STAR + 1
    }

    /// True when a revealed round waits for an explicit continue
    pub fn awaiting_continue(&self) -> bool {
        self.locked && self.pending_advance.is_none()
    }

    /// Switch clef. Abandons the current round unconditionally: cancels any
    /// pending advance and shows a fresh note from the new clef's range.
    pub fn select_clef(&mut self, clef: Clef) -> Outcome {
        self.clef = clef;
        self.next_note();
        Outcome {
            staff_changed: true,
            ..Outcome::default()
        }
    }

    /// Submit a letter answer. Ignored while the round is resolved.
    pub fn submit(&mut self, answer: char, now: Instant) -> Outcome {
        if self.locked {
            return Outcome::default();
        }

        let mut outcome = Outcome {
            stats_changed: true,
            ..Outcome::default()
        };

        if self.pitch.matches(answer) {
            outcome.cues.push(Cue::Correct);
            self.message = "✅ Correct!".to_string();
            self.correct_count += 1;
            self.stats.record_correct();

            if self.correct_count % CORRECT_PER_STAR == 0 {
                self.stars += 1;
                outcome.cues.push(Cue::LevelUp);
                self.banner_visible = true;
                self.banner_until = Some(now + BANNER_HOLD);
            }

            self.locked = true;
            self.pending_advance = Some(now + ADVANCE_AFTER_CORRECT);
        } else {
            outcome.cues.push(Cue::Wrong);
            self.attempts += 1;
            self.stats.record_mistake(self.pitch.letter.as_lower());

            if self.attempts >= MAX_ATTEMPTS {
                self.message = format!(
                    "❌ The correct answer was {}",
                    self.pitch.letter.as_char()
                );
                self.locked = true;
                if self.policy == AdvancePolicy::Auto {
                    self.pending_advance = Some(now + ADVANCE_AFTER_REVEAL);
                }
            } else {
                self.message = format!(
                    "❌ Try again! ({} attempts left)",
                    MAX_ATTEMPTS - self.attempts
                );
            }
        }

        outcome
    }

    /// Explicit continue out of a revealed round (manual policy)
    pub fn continue_round(&mut self) -> Outcome {
        if !self.awaiting_continue() {
            return Outcome::default();
        }
        self.next_note();
        Outcome {
            staff_changed: true,
            ..Outcome::default()
        }
    }

    /// Advance timers: fires a due pending advance and expires the banner.
    /// Called on every poll timeout of the event loop.
    pub fn tick(&mut self, now: Instant) -> Outcome {
        if let Some(until) = self.banner_until {
            if now >= until {
                self.banner_visible = false;
                self.banner_until = None;
            }
        }

        if let Some(deadline) = self.pending_advance {
            if now >= deadline {
                self.next_note();
                return Outcome {
                    staff_changed: true,
                    ..Outcome::default()
                };
            }
        }
        Outcome::default()
    }

    /// Zero the in-memory statistics and session progress (the caller
    /// resets the store)
    pub fn reset_progress(&mut self) {
        self.stats = StatsRecord::default();
        self.correct_count = 0;
        self.stars = 0;
        self.message.clear();
    }

    fn next_note(&mut self) {
        self.pitch = self.picker.pick(self.clef);
        self.attempts = 0;
        self.message.clear();
        self.locked = false;
        self.pending_advance = None;
    }
}
