//! Applying and retracting moves in place. A [`Move`] embeds the flags
//! word the position had before it was made, so `undo` needs no separate
//! history stack: restore the flags word, move the piece back, and
//! re-materialize whatever was captured at its recorded square.

use crate::board::flags::{self, Flags};
use crate::board::Position;
use crate::moves::types::Move;
use crate::square::{CastleSide, Color, Piece, Square};

fn side_to_move_of(flags: Flags) -> Color {
    if flags & flags::SIDE_TO_MOVE_BIT == 0 {
        Color::White
    } else {
        Color::Black
    }
}

fn castle_bit(color: Color, side: CastleSide) -> Flags {
    match (color, side) {
        (Color::White, CastleSide::King) => flags::CASTLE_WK,
        (Color::White, CastleSide::Queen) => flags::CASTLE_WQ,
        (Color::Black, CastleSide::King) => flags::CASTLE_BK,
        (Color::Black, CastleSide::Queen) => flags::CASTLE_BQ,
    }
}

/// Which side's rook, if any, starts on `square`.
fn castle_side_for_rook_square(color: Color, square: Square) -> Option<CastleSide> {
    match (color, square.index()) {
        (Color::White, 0) => Some(CastleSide::Queen),
        (Color::White, 7) => Some(CastleSide::King),
        (Color::Black, 56) => Some(CastleSide::Queen),
        (Color::Black, 63) => Some(CastleSide::King),
        _ => None,
    }
}

fn castle_rook_squares(color: Color, king_destination: Square) -> (Square, Square) {
    match (color, king_destination.file()) {
        (Color::White, 6) => (Square::from_index(7), Square::from_index(5)),
        (Color::White, 2) => (Square::from_index(0), Square::from_index(3)),
        (Color::Black, 6) => (Square::from_index(63), Square::from_index(61)),
        (Color::Black, 2) => (Square::from_index(56), Square::from_index(59)),
        _ => unreachable!("castling king destination must land on file c or g"),
    }
}

impl Position {
    /// Applies `mv`, which must have been generated against this exact
    /// position state (its embedded pre-move flags must match).
    pub fn apply(&mut self, mv: Move) {
        debug_assert_eq!(
            self.flags_word(),
            mv.pre_move_flags(),
            "move was encoded against a different position state"
        );

        let mover_color = self.side_to_move();
        let source = mv.source();
        let destination = mv.destination();
        let mover_piece = self
            .piece_on(source)
            .expect("apply: no piece on the move's source square");

        if mv.is_capture() {
            let captured_square = mv.captured_square().unwrap();
            let captured_piece = mv.captured_piece().unwrap();
            self.remove_piece(mover_color.opposite(), captured_piece, captured_square);
        }

        self.remove_piece(mover_color, mover_piece, source);
        let placed_piece = mv.promoted_piece().unwrap_or(mover_piece);
        self.put_piece(mover_color, placed_piece, destination);

        if mv.is_castling(mover_piece) {
            let (rook_source, rook_destination) = castle_rook_squares(mover_color, destination);
            self.remove_piece(mover_color, Piece::Rook, rook_source);
            self.put_piece(mover_color, Piece::Rook, rook_destination);
        }

        self.update_flags_after_move(mover_color, mover_piece, source, destination);
        self.flip_side_to_move();
    }

    /// Retracts `mv`, restoring the position to exactly the state it had
    /// before `apply(mv)` was called.
    pub fn undo(&mut self, mv: Move) {
        let mover_color = side_to_move_of(mv.pre_move_flags());
        let source = mv.source();
        let destination = mv.destination();

        let placed_piece = self
            .piece_on(destination)
            .expect("undo: no piece on the move's destination square");
        let original_piece = if mv.is_promotion() { Piece::Pawn } else { placed_piece };

        if mv.is_castling(original_piece) {
            let (rook_source, rook_destination) = castle_rook_squares(mover_color, destination);
            self.remove_piece(mover_color, Piece::Rook, rook_destination);
            self.put_piece(mover_color, Piece::Rook, rook_source);
        }

        self.remove_piece(mover_color, placed_piece, destination);
        self.put_piece(mover_color, original_piece, source);

        if mv.is_capture() {
            let captured_square = mv.captured_square().unwrap();
            let captured_piece = mv.captured_piece().unwrap();
            self.put_piece(mover_color.opposite(), captured_piece, captured_square);
        }

        self.set_flags_word(mv.pre_move_flags());
    }

    fn update_flags_after_move(
        &mut self,
        mover_color: Color,
        mover_piece: Piece,
        source: Square,
        destination: Square,
    ) {
        let is_double_push = mover_piece == Piece::Pawn
            && (source.rank() as i16 - destination.rank() as i16).abs() == 2;
        if is_double_push {
            let ep_rank = (source.rank() + destination.rank()) / 2;
            self.set_en_passant(Some(Square::from_file_rank(source.file(), ep_rank)));
        } else {
            self.set_en_passant(None);
        }

        match mover_piece {
            Piece::King => {
                self.set_castling_bit(castle_bit(mover_color, CastleSide::King), false);
                self.set_castling_bit(castle_bit(mover_color, CastleSide::Queen), false);
            }
            Piece::Rook => {
                if let Some(side) = castle_side_for_rook_square(mover_color, source) {
                    self.set_castling_bit(castle_bit(mover_color, side), false);
                }
            }
            _ => {}
        }

        let opponent = mover_color.opposite();
        if let Some(side) = castle_side_for_rook_square(opponent, destination) {
            self.set_castling_bit(castle_bit(opponent, side), false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn round_trip(fen: &str, mv_str: &str) {
        let mut p = Position::from_fen(fen).unwrap();
        let before = p.clone();
        let mv = Move::from_algebraic(mv_str, &p).unwrap();
        p.apply(mv);
        assert_ne!(p, before, "apply should change the position");
        p.undo(mv);
        assert_eq!(p, before, "undo should restore the exact prior position");
    }

    #[test]
    fn quiet_move_round_trips() {
        round_trip(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2e4",
        );
    }

    #[test]
    fn capture_round_trips() {
        round_trip(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "e4d5",
        );
    }

    #[test]
    fn en_passant_round_trips_and_removes_captured_pawn() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let mut p = Position::from_fen(fen).unwrap();
        let before = p.clone();
        let mv = Move::from_algebraic("e5d6", &p).unwrap();
        p.apply(mv);
        assert_eq!(p.piece_on(Square::from_index(35)), None, "captured pawn must be gone");
        assert_eq!(p.piece_on(Square::from_index(43)), Some(Piece::Pawn));
        p.undo(mv);
        assert_eq!(p, before);
    }

    #[test]
    fn castling_round_trips_and_moves_the_rook() {
        let fen = "r3k2r/pppqbppp/2npbn2/4p3/4P3/2NPBN2/PPPQBPPP/R3K2R w KQkq - 0 1";
        let mut p = Position::from_fen(fen).unwrap();
        let before = p.clone();
        let mv = Move::from_algebraic("e1g1", &p).unwrap();
        p.apply(mv);
        assert_eq!(p.piece_on(Square::from_index(5)), Some(Piece::Rook));
        assert_eq!(p.piece_on(Square::from_index(7)), None);
        assert!(!p.castling_rights(Color::White, CastleSide::King));
        assert!(!p.castling_rights(Color::White, CastleSide::Queen));
        p.undo(mv);
        assert_eq!(p, before);
    }

    #[test]
    fn promotion_round_trips_back_to_a_pawn() {
        let fen = "8/P7/8/8/8/8/8/k6K w - - 0 1";
        let mut p = Position::from_fen(fen).unwrap();
        let before = p.clone();
        let mv = Move::from_algebraic("a7a8q", &p).unwrap();
        p.apply(mv);
        assert_eq!(p.piece_on(Square::from_index(56)), Some(Piece::Queen));
        p.undo(mv);
        assert_eq!(p, before);
        assert_eq!(p.piece_on(Square::from_index(48)), Some(Piece::Pawn));
    }

    #[test]
    fn rook_move_from_corner_forfeits_that_sides_castling_right() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut p = Position::from_fen(fen).unwrap();
        let mv = Move::from_algebraic("a1b1", &p).unwrap();
        p.apply(mv);
        assert!(!p.castling_rights(Color::White, CastleSide::Queen));
        assert!(p.castling_rights(Color::White, CastleSide::King));
    }

    #[test]
    fn capturing_a_corner_rook_forfeits_the_victims_castling_right() {
        let fen = "r3k2r/8/8/8/8/8/8/Q3K2R w KQkq - 0 1";
        let mut p = Position::from_fen(fen).unwrap();
        let mv = Move::from_algebraic("a1a8", &p).unwrap();
        p.apply(mv);
        assert!(!p.castling_rights(Color::Black, CastleSide::Queen));
        assert!(p.castling_rights(Color::Black, CastleSide::King));
    }
}
