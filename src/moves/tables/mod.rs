//! One-shot initialization of every precomputed move table the generator
//! needs: knight/king leaper tables, the pawn destination table, and the
//! rook/bishop magic sliding-piece tables.

pub mod leapers;
pub mod pawns;

use super::magic::precompute::{generate_magic_tables, MagicTableSeed};
use super::magic::MagicTables;
use pawns::PawnTable;
use once_cell::sync::OnceCell;

/// A fixed seed for the magic-number search, used when the
/// `deterministic_magic` feature is enabled (the default). Every build
/// then produces byte-identical magic tables.
const DETERMINISTIC_MAGIC_SEED: u64 = 0x5EED_1234_BEEF_C0DE;

/// Bundle of every process-wide, read-only table the move generator
/// consults. Built once by [`initialize_tables`] and handed out by
/// [`tables`] thereafter.
pub struct Tables {
    pub magic: MagicTables,
    pub pawn: PawnTable,
}

static TABLES: OnceCell<Tables> = OnceCell::new();

/// Builds the precomputed tables. Idempotent: the first call does the
/// work, every later call is a no-op. Must be called before any move
/// generator or square-attacked query runs.
pub fn initialize_tables() {
    TABLES.get_or_init(|| {
        let seed = magic_search_seed();
        let magic = generate_magic_tables(MagicTableSeed::Fixed(seed))
            .expect("magic number search failed");
        Tables {
            magic,
            pawn: pawns::build_pawn_table(),
        }
    });
}

#[cfg(feature = "deterministic_magic")]
fn magic_search_seed() -> u64 {
    DETERMINISTIC_MAGIC_SEED
}

#[cfg(not(feature = "deterministic_magic"))]
fn magic_search_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DETERMINISTIC_MAGIC_SEED)
}

/// Returns the initialized tables. Panics if [`initialize_tables`] has not
/// been called yet — a programmer error per the table-initialization
/// contract.
pub fn tables() -> &'static Tables {
    TABLES
        .get()
        .expect("initialize_tables() must be called before using move tables")
}
