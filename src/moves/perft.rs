//! Perft: recursive leaf-node counting over the legal-move tree, used to
//! regression-test the generator against published counts for standard
//! positions.

use crate::board::Position;
use crate::moves::movegen::Generator;
use crate::moves::types::Move;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 2;

/// Counts the leaf positions reachable by recursively driving the
/// generator `depth` plies deep from `position`'s current state. Leaves
/// the position unchanged on return.
#[instrument(skip(position), fields(depth))]
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    let mut gen = Generator::new(position);
    loop {
        let mv = gen.next();
        if mv.is_no_more_moves() {
            break;
        }
        let pos = gen.position_mut();
        pos.apply(mv);
        nodes += perft(pos, depth - 1);
        pos.undo(mv);
    }

    if depth <= MAX_LOG_DEPTH {
        debug!(depth, nodes, "perft node count");
    }
    nodes
}

/// Per-root-move leaf counts at `depth`, for diffing against a reference
/// engine's perft divide output.
#[instrument(skip(position), fields(depth))]
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    let mut results = Vec::new();
    let mut gen = Generator::new(position);
    loop {
        let mv = gen.next();
        if mv.is_no_more_moves() {
            break;
        }
        let pos = gen.position_mut();
        pos.apply(mv);
        let count = if depth == 0 { 1 } else { perft(pos, depth - 1) };
        pos.undo(mv);
        debug!(mv = %mv, count, "perft divide branch");
        results.push((mv, count));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::tables::initialize_tables;

    #[test]
    fn startpos_perft_matches_published_counts() {
        initialize_tables();
        let mut p = Position::startpos();
        assert_eq!(perft(&mut p, 1), 20);
        assert_eq!(perft(&mut p, 2), 400);
        assert_eq!(perft(&mut p, 3), 8_902);
    }

    #[test]
    fn kiwipete_perft_matches_published_counts() {
        initialize_tables();
        let mut p = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&mut p, 1), 48);
        assert_eq!(perft(&mut p, 2), 2_039);
        assert_eq!(perft(&mut p, 3), 97_862);
    }

    #[test]
    fn perft_leaves_the_position_unchanged() {
        initialize_tables();
        let mut p = Position::startpos();
        let before = p.clone();
        perft(&mut p, 3);
        assert_eq!(p, before);
    }
}
