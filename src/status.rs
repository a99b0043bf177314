//! Checkmate and stalemate: both are defined purely in terms of whether
//! the side to move has any legal move, which a fresh [`Generator`]
//! answers without needing any cached history or hashing.

use crate::board::Position;
use crate::moves::movegen::Generator;
use crate::moves::square_control::in_check;
use crate::moves::tables::tables;

/// Whether `position` has at least one legal move for the side to move.
fn has_legal_move(position: &mut Position) -> bool {
    let mut gen = Generator::new(position);
    !gen.next().is_no_more_moves()
}

impl Position {
    /// True iff the side to move is in check and has no legal move.
    pub fn is_checkmate(&mut self) -> bool {
        let side = self.side_to_move();
        in_check(self, side, &tables().magic) && !has_legal_move(self)
    }

    /// True iff the side to move is not in check but has no legal move.
    pub fn is_stalemate(&mut self) -> bool {
        let side = self.side_to_move();
        !in_check(self, side, &tables().magic) && !has_legal_move(self)
    }
}
