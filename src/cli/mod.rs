//! CLI Interface: User input, terminal rendering, and cues
//!
//! # Components
//! - `input.rs`: Keystroke capture using crossterm
//! - `display.rs`: Terminal rendering and UI
//! - `cues.rs`: Fire-and-forget feedback cues

pub mod cues;
pub mod display;
pub mod input;
