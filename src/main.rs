//! Note Read Trainer - staff note identification drills
//!
//! Single-session, self-contained CLI application.
//! Shows a random note on a staff and scores letter-name answers, with
//! accuracy statistics persisted between sessions.

mod cli;
mod notation;
mod quiz;

use clap::Parser;
use cli::cues::{CueSink, TerminalCues};
use cli::display::{Display, STAFF_COL, STAFF_ROW};
use cli::input::InputHandler;
use notation::pitch::Clef;
use notation::staff::{NotationRenderer, TerminalStaff};
use quiz::picker::NotePicker;
use quiz::state::{AdvancePolicy, Outcome, QuizState};
use quiz::stats::StatsStore;
use std::error::Error;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "Note Read Trainer")]
#[command(about = "Staff note-reading drills with streaks, stars, and stats")]
struct Args {
    /// Starting clef
    #[arg(short, long, value_enum, default_value = "treble")]
    clef: Clef,

    /// Path to the statistics file
    #[arg(short, long, default_value = "data/stats.json")]
    stats: String,

    /// How a three-times-missed round advances
    #[arg(short, long, value_enum, default_value = "auto")]
    advance: AdvancePolicy,

    /// Disable terminal bell cues
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,
}

/// Run a transition's effects: cues first, then persistence
fn apply_outcome(
    outcome: &Outcome,
    cues: &mut dyn CueSink,
    store: &StatsStore,
    state: &QuizState,
) -> Result<(), Box<dyn Error>> {
    for &cue in &outcome.cues {
        cues.play(cue);
    }
    if outcome.stats_changed {
        store.save(&state.stats)?;
    }
    Ok(())
}

/// Redraw the whole frame from state
fn render_frame(
    display: &Display,
    staff: &mut dyn NotationRenderer,
    state: &QuizState,
) -> Result<(), Box<dyn Error>> {
    display.clear()?;
    display.show_title()?;
    display.show_clefs(state.clef)?;
    staff.draw(state.clef, state.pitch)?;
    display.show_answers(state.locked)?;
    display.show_message(&state.message)?;
    display.show_progress(state)?;
    if state.banner_visible {
        display.show_banner()?;
    }
    display.show_help(state.awaiting_continue())?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("🎵 Note Read Trainer v0.1.0");
    println!(
        "Clef: {} | Stats: {} | Advance: {:?}",
        args.clef, args.stats, args.advance
    );

    // Load persisted statistics (absent or malformed file starts fresh)
    let store = StatsStore::new(&args.stats, args.debug);
    let record = store.load();
    if args.debug {
        println!(
            "✓ Statistics loaded: {} answered, {} correct",
            record.total, record.correct
        );
    }

    let mut state = QuizState::new(args.clef, NotePicker::default(), record, args.advance);

    // Initialize display and collaborators
    let display = Display::simple()?;
    let mut staff = TerminalStaff::new(STAFF_ROW, STAFF_COL);
    let mut cues = TerminalCues::new(args.quiet);

    // Initialize input handler
    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    let mut dirty = true;

    // Event loop
    'session: loop {
        if dirty {
            render_frame(&display, &mut staff, &state)?;
            dirty = false;
        }

        match input.read_key()? {
            Some(key) => {
                if InputHandler::is_exit(&key) {
                    break 'session;
                }

                if let Some(letter) = InputHandler::answer_letter(&key) {
                    let outcome = state.submit(letter.as_char(), Instant::now());
                    apply_outcome(&outcome, &mut cues, &store, &state)?;
                    dirty = true;
                } else if let Some(clef) = InputHandler::clef_choice(&key) {
                    let outcome = state.select_clef(clef);
                    apply_outcome(&outcome, &mut cues, &store, &state)?;
                    dirty = true;
                } else if InputHandler::is_clef_cycle(&key) {
                    let outcome = state.select_clef(state.clef.next());
                    apply_outcome(&outcome, &mut cues, &store, &state)?;
                    dirty = true;
                } else if InputHandler::is_continue(&key) {
                    let outcome = state.continue_round();
                    if outcome.staff_changed {
                        dirty = true;
                    }
                } else if InputHandler::is_reset(&key) {
                    store.reset()?;
                    state.reset_progress();
                    dirty = true;
                }
            }
            None => {
                // Timeout - fire due advances and expire the banner
                let banner_was_visible = state.banner_visible;
                let outcome = state.tick(Instant::now());
                if outcome.staff_changed || banner_was_visible != state.banner_visible {
                    dirty = true;
                }
            }
        }
    }

    // Cleanup
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;

    // Summary
    println!("\n🎉 Session Complete!");
    println!(
        "📊 Session: {} correct | {} stars | level {}",
        state.correct_count,
        state.stars,
        state.level()
    );
    println!(
        "🎯 All time: {} of {} answered ({})",
        state.stats.correct,
        state.stats.total,
        state.stats.accuracy_display()
    );

    let most_missed = state.stats.top_mistakes(3);
    if !most_missed.is_empty() {
        let listing: Vec<String> = most_missed
            .iter()
            .map(|(letter, count)| format!("{} ({}x)", letter.to_ascii_uppercase(), count))
            .collect();
        println!("⚠️  Most missed notes: {}", listing.join(", "));
    }

    println!("🎵 Thanks for practicing!");

    Ok(())
}
