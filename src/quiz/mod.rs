//! Quiz: state machine, note selection, and statistics
//!
//! # Components
//! - `state.rs`: round/session state machine driven by the event loop
//! - `picker.rs`: random note generator with an injectable random source
//! - `stats.rs`: persisted accuracy statistics

pub mod picker;
pub mod state;
pub mod stats;

pub use picker::NotePicker;
pub use state::{AdvancePolicy, Cue, Outcome, QuizState};
pub use stats::{StatsRecord, StatsStore};
