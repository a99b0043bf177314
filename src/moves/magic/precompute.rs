//! One-shot construction of the rook/bishop magic tables.
//!
//! Magic numbers aren't shipped as baked literals here: rather than
//! hand-transcribe 128 64-bit constants with no compiler to check them
//! against, table construction runs the same seeded search the square
//! masks and blocker permutations are built from, once, at
//! [`crate::tables::initialize_tables`] time. A fixed seed
//! (`MagicTableSeed::Fixed`) makes every build produce byte-identical
//! tables.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::attacks::{bishop_attacks_per_square, bishop_mask_for_square, rook_attacks_per_square, rook_mask_for_square};
use super::search::find_magic_number_for_square;
use super::structs::{BishopMagicTables, MagicEntry, MagicTables, RookMagicTables};

/// The seed driving magic-number search.
pub enum MagicTableSeed {
    /// A fixed constant, for reproducible table construction.
    Fixed(u64),
}

impl MagicTableSeed {
    fn into_rng(self) -> StdRng {
        match self {
            MagicTableSeed::Fixed(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Enumerates every subset of `mask` via the carry-rippler trick, including
/// the empty subset.
fn enumerate_subsets(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1usize << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

fn build_entry<R: rand::RngCore>(
    square: usize,
    mask_fn: fn(usize) -> u64,
    attacks_fn: fn(usize, u64) -> u64,
    rng: &mut R,
) -> Result<MagicEntry, String> {
    let mask = mask_fn(square);
    let bits = mask.count_ones();
    let shift = 64 - bits;

    let blocker_subsets = enumerate_subsets(mask);
    let attack_sets: Vec<u64> = blocker_subsets
        .iter()
        .map(|&subset| attacks_fn(square, subset))
        .collect();

    let magic = find_magic_number_for_square(&blocker_subsets, &attack_sets, shift, rng)?;

    let mut table = vec![0u64; 1usize << bits];
    for (subset, attack) in blocker_subsets.iter().zip(attack_sets.iter()) {
        let index = (subset.wrapping_mul(magic) >> shift) as usize;
        table[index] = *attack;
    }

    Ok(MagicEntry {
        magic,
        shift,
        mask,
        table: table.into_boxed_slice(),
    })
}

/// Builds the combined rook+bishop magic tables (≈108K entries total).
pub fn generate_magic_tables(seed: MagicTableSeed) -> Result<MagicTables, String> {
    let mut rng = seed.into_rng();

    let mut rook_entries = Vec::with_capacity(64);
    for square in 0..64 {
        rook_entries.push(build_entry(
            square,
            rook_mask_for_square,
            rook_attacks_per_square,
            &mut rng,
        )?);
    }

    let mut bishop_entries = Vec::with_capacity(64);
    for square in 0..64 {
        bishop_entries.push(build_entry(
            square,
            bishop_mask_for_square,
            bishop_attacks_per_square,
            &mut rng,
        )?);
    }

    Ok(MagicTables {
        rook: RookMagicTables { entries: rook_entries },
        bishop: BishopMagicTables { entries: bishop_entries },
    })
}
