//! Random note selection
//!
//! Picks uniformly from the active clef's allow-list. Randomness flows
//! through the `RandomSource` trait so tests can script the sequence.

use crate::notation::pitch::{Clef, Pitch};
use rand::Rng;

/// Source of pick indices, substitutable in tests
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Thread-RNG-backed source used by the real application
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Note generator for the quiz
pub struct NotePicker {
    source: Box<dyn RandomSource>,
}

impl NotePicker {
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        NotePicker { source }
    }

    /// Pick a random note from the clef's allow-list
    pub fn pick(&mut self, clef: Clef) -> Pitch {
        let range = clef.range();
        range[self.source.pick_index(range.len())]
    }
}

impl Default for NotePicker {
    fn default() -> Self {
        NotePicker::new(Box::new(ThreadRandom))
    }
}

#[cfg(test)]
pub mod testing {
    use super::RandomSource;

    /// Replays a fixed sequence of indices (clamped to range), then zeros
    pub struct Scripted {
        indices: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        pub fn new(indices: Vec<usize>) -> Self {
            Scripted { indices, next: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn pick_index(&mut self, len: usize) -> usize {
            let idx = self.indices.get(self.next).copied().unwrap_or(0);
            self.next += 1;
            idx.min(len - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Scripted;
    use super::*;
    use crate::notation::pitch::Clef;

    #[test]
    fn test_pick_stays_within_allow_list() {
        let mut picker = NotePicker::default();
        for clef in Clef::ALL {
            for _ in 0..200 {
                let pitch = picker.pick(clef);
                assert!(
                    clef.range().contains(&pitch),
                    "{} not allowed for {}",
                    pitch,
                    clef
                );
            }
        }
    }

    #[test]
    fn test_scripted_source_is_deterministic() {
        let mut picker = NotePicker::new(Box::new(Scripted::new(vec![0, 3, 3])));
        let range = Clef::Treble.range();
        assert_eq!(picker.pick(Clef::Treble), range[0]);
        assert_eq!(picker.pick(Clef::Treble), range[3]);
        assert_eq!(picker.pick(Clef::Treble), range[3]);
        // Script exhausted: falls back to the first entry
        assert_eq!(picker.pick(Clef::Treble), range[0]);
    }

    #[test]
    fn test_scripted_index_clamped_to_range() {
        let mut picker = NotePicker::new(Box::new(Scripted::new(vec![999])));
        let range = Clef::Alto.range();
        assert_eq!(picker.pick(Clef::Alto), range[range.len() - 1]);
    }
}
