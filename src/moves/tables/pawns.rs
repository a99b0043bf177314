//! Pawn destination table indexed by (color, square, 3-bit forward
//! occupancy, 1-bit double-push blocker).
//!
//! The 3 occupancy bits are, from low to high: forward-left occupied,
//! forward occupied, forward-right occupied. The double-push blocker bit
//! is whether the square two ranks forward is occupied. Callers build the
//! occupancy bit-set with the en-passant target square set as if occupied,
//! so a diagonal destination onto that square is produced the same way a
//! real capture would be.

/// [color][square][occupancy_index] -> pseudo-legal destination bit-set,
/// not yet filtered by "is that square actually an enemy".
pub type PawnTable = [[[u64; 16]; 64]; 2];

const LEFT_OCC: usize = 1 << 0;
const FWD_OCC: usize = 1 << 1;
const RIGHT_OCC: usize = 1 << 2;
const DOUBLE_BLOCKED: usize = 1 << 3;

pub fn build_pawn_table() -> PawnTable {
    let mut table = [[[0u64; 16]; 64]; 2];

    for color in 0..2usize {
        let forward: isize = if color == 0 { 1 } else { -1 };
        let start_rank: isize = if color == 0 { 1 } else { 6 };

        for square in 0..64usize {
            let rank = (square / 8) as isize;
            let file = (square % 8) as isize;
            let fwd_rank = rank + forward;
            if !(0..8).contains(&fwd_rank) {
                continue; // pawns never sit on rank 0/7 to begin with
            }
            let fwd_sq = fwd_rank * 8 + file;
            let left_sq = (file > 0).then(|| fwd_rank * 8 + file - 1);
            let right_sq = (file < 7).then(|| fwd_rank * 8 + file + 1);
            let double_sq = (rank == start_rank).then(|| (rank + 2 * forward) * 8 + file);

            for occ_idx in 0..16usize {
                let mut dest = 0u64;
                let fwd_blocked = occ_idx & FWD_OCC != 0;
                if !fwd_blocked {
                    dest |= 1u64 << fwd_sq;
                    if let Some(d) = double_sq {
                        if occ_idx & DOUBLE_BLOCKED == 0 {
                            dest |= 1u64 << d;
                        }
                    }
                }
                if occ_idx & LEFT_OCC != 0 {
                    if let Some(s) = left_sq {
                        dest |= 1u64 << s;
                    }
                }
                if occ_idx & RIGHT_OCC != 0 {
                    if let Some(s) = right_sq {
                        dest |= 1u64 << s;
                    }
                }
                table[color][square][occ_idx] = dest;
            }
        }
    }

    table
}

/// Packs the 3-bit forward occupancy + 1-bit double-push-blocker index
/// from an occupancy bit-set (which should already have the en-passant
/// target bit set, if any).
pub fn pawn_occupancy_index(color: usize, square: usize, occupancy: u64) -> usize {
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    let forward: isize = if color == 0 { 1 } else { -1 };
    let fwd_rank = rank + forward;
    if !(0..8).contains(&fwd_rank) {
        return 0;
    }

    let test = |r: isize, f: isize| -> bool {
        if !(0..8).contains(&r) || !(0..8).contains(&f) {
            return false;
        }
        (occupancy >> (r * 8 + f)) & 1 != 0
    };

    let mut idx = 0usize;
    if test(fwd_rank, file - 1) {
        idx |= LEFT_OCC;
    }
    if test(fwd_rank, file) {
        idx |= FWD_OCC;
    }
    if test(fwd_rank, file + 1) {
        idx |= RIGHT_OCC;
    }
    let start_rank: isize = if color == 0 { 1 } else { 6 };
    if rank == start_rank && test(rank + 2 * forward, file) {
        idx |= DOUBLE_BLOCKED;
    }
    idx
}
