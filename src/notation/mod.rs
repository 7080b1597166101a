//! Notation: clef/pitch model and staff rendering
//!
//! # Components
//! - `pitch.rs`: clefs, letters, pitches, and per-clef allow-lists
//! - `staff.rs`: staff layout and the `NotationRenderer` seam

pub mod pitch;
pub mod staff;

pub use pitch::{Clef, Letter, Pitch};
pub use staff::NotationRenderer;
