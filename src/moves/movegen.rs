//! The streaming pseudo-legal/legal move generator.
//!
//! [`Generator`] is a plain value carrying the state machine described in
//! the design: a cursor over (piece kind, source square), the remaining
//! destination bit-set for the square currently being expanded, and a
//! small pending-promotions queue for when that destination lands on the
//! back rank. Pseudo-legal candidates are filtered into legal moves by
//! applying each one to the bound position, testing the mover's king for
//! check, and retracting it — the position is never left mutated by
//! [`Generator::next`], only by [`Generator::next_apply`].

use crate::bitboard::BitboardExt;
use crate::board::Position;
use crate::moves::magic::MagicTables;
use crate::moves::square_control::{self, in_check};
use crate::moves::tables::{self, pawns::pawn_occupancy_index};
use crate::moves::types::Move;
use crate::square::{CastleSide, Color, Piece, Square};

/// Fixed, total enumeration order: king, pawn, knight, rook, bishop, queen.
const KIND_ORDER: [Piece; 6] = [
    Piece::King,
    Piece::Pawn,
    Piece::Knight,
    Piece::Rook,
    Piece::Bishop,
    Piece::Queen,
];

/// Promotion pieces in the order moves are emitted: queen first (yielded
/// immediately), then rook, bishop, knight (queued).
const PROMO_QUEUE: [Piece; 3] = [Piece::Knight, Piece::Bishop, Piece::Rook];

fn castle_between_mask(color: Color, side: CastleSide) -> u64 {
    match (color, side) {
        (Color::White, CastleSide::King) => (1u64 << 5) | (1u64 << 6),
        (Color::White, CastleSide::Queen) => (1u64 << 1) | (1u64 << 2) | (1u64 << 3),
        (Color::Black, CastleSide::King) => (1u64 << 61) | (1u64 << 62),
        (Color::Black, CastleSide::Queen) => (1u64 << 57) | (1u64 << 58) | (1u64 << 59),
    }
}

fn castle_destination(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::King) => Square::from_index(6),
        (Color::White, CastleSide::Queen) => Square::from_index(2),
        (Color::Black, CastleSide::King) => Square::from_index(62),
        (Color::Black, CastleSide::Queen) => Square::from_index(58),
    }
}

/// A streaming legal-move iterator bound exclusively to one position.
/// Nothing else may mutate the position between two [`Generator::next`]
/// calls; the generator itself mutates it transiently (apply, then undo)
/// while testing candidate legality.
pub struct Generator<'a> {
    position: &'a mut Position,
    tables: &'static MagicTables,
    color: Color,
    own: u64,
    occupancy: u64,
    pawn_occupancy: u64,

    kind_idx: usize,
    sources: u64,
    src: u8,
    dest: u64,

    promo_dest: Square,
    promo_remaining: [Piece; 3],
    promo_count: u8,

    /// 0 = try king-side next, 1 = try queen-side next, 2 = exhausted.
    castle_stage: u8,
    done: bool,
}

impl<'a> Generator<'a> {
    /// Binds a new generator to `position`. Requires
    /// [`crate::moves::tables::initialize_tables`] to have run already.
    pub fn new(position: &'a mut Position) -> Self {
        let tables = &tables::tables().magic;
        let color = position.side_to_move();
        let own = position.occupancy(color);
        let occupancy = position.occupied();
        let pawn_occupancy = match position.en_passant_target() {
            Some(ep) => occupancy | ep.bit(),
            None => occupancy,
        };
        let sources = position.pieces(color, KIND_ORDER[0]);

        Generator {
            position,
            tables,
            color,
            own,
            occupancy,
            pawn_occupancy,
            kind_idx: 0,
            sources,
            src: 0,
            dest: 0,
            promo_dest: Square::NONE,
            promo_remaining: [Piece::Knight; 3],
            promo_count: 0,
            castle_stage: 0,
            done: false,
        }
    }

    /// Yields the next legal move, or [`Move::NO_MORE_MOVES`] once
    /// exhausted. The position is left unchanged by this call.
    pub fn next(&mut self) -> Move {
        match self.advance_legal() {
            Some(mv) => mv,
            None => {
                self.done = true;
                Move::NO_MORE_MOVES
            }
        }
    }

    /// Re-borrows the bound position. Lets callers (perft) apply/undo
    /// moves themselves between `next()` calls without holding a second
    /// reference to the position alongside the generator.
    pub fn position_mut(&mut self) -> &mut Position {
        self.position
    }

    /// Yields the next legal move and leaves the position applied (in the
    /// post-move state). The caller must call `position.undo(move)` before
    /// pulling the generator again.
    pub fn next_apply(&mut self) -> Move {
        match self.advance_legal() {
            Some(mv) => {
                self.position.apply(mv);
                mv
            }
            None => {
                self.done = true;
                Move::NO_MORE_MOVES
            }
        }
    }

    fn advance_legal(&mut self) -> Option<Move> {
        if self.done {
            return None;
        }
        loop {
            let candidate = match self.next_pseudo_legal() {
                Some(mv) => mv,
                None => self.next_castle()?,
            };
            let mover = self.color;
            self.position.apply(candidate);
            let illegal = in_check(self.position, mover, self.tables);
            self.position.undo(candidate);
            if !illegal {
                return Some(candidate);
            }
        }
    }

    fn next_pseudo_legal(&mut self) -> Option<Move> {
        if self.promo_count > 0 {
            self.promo_count -= 1;
            let piece = self.promo_remaining[self.promo_count as usize];
            return Some(self.build_pawn_move(self.src, self.promo_dest, Some(piece)));
        }

        loop {
            if self.dest == 0 && !self.advance_source() {
                return None;
            }
            let d = self.dest.pop_lsb();
            let dst = Square::from_index(d);
            let kind = KIND_ORDER[self.kind_idx];

            if kind == Piece::Pawn {
                if dst.rank() == 0 || dst.rank() == 7 {
                    self.promo_dest = dst;
                    self.promo_remaining = PROMO_QUEUE;
                    self.promo_count = 3;
                    return Some(self.build_pawn_move(self.src, dst, Some(Piece::Queen)));
                }
                return Some(self.build_pawn_move(self.src, dst, None));
            }
            return Some(self.build_move(kind, self.src, dst));
        }
    }

    /// Advances `(kind_idx, src)` to the next source square with a
    /// non-empty destination set, recomputing `dest` as it goes. Returns
    /// false once every piece kind has been walked.
    fn advance_source(&mut self) -> bool {
        loop {
            if self.sources != 0 {
                self.src = self.sources.pop_lsb();
                self.dest = self.compute_dest(KIND_ORDER[self.kind_idx], self.src);
                if self.dest != 0 {
                    return true;
                }
                continue;
            }
            if self.kind_idx + 1 >= KIND_ORDER.len() {
                return false;
            }
            self.kind_idx += 1;
            self.sources = self.position.pieces(self.color, KIND_ORDER[self.kind_idx]);
        }
    }

    fn compute_dest(&self, kind: Piece, src: u8) -> u64 {
        let raw = match kind {
            Piece::King => tables::leapers::king_attacks(src as usize),
            Piece::Knight => tables::leapers::knight_attacks(src as usize),
            Piece::Pawn => {
                let idx = pawn_occupancy_index(self.color as usize, src as usize, self.pawn_occupancy);
                tables::tables().pawn[self.color as usize][src as usize][idx]
            }
            Piece::Rook => self.tables.rook.get_attacks(src as usize, self.occupancy),
            Piece::Bishop => self.tables.bishop.get_attacks(src as usize, self.occupancy),
            Piece::Queen => self.tables.queen_attacks(src as usize, self.occupancy),
        };
        raw & !self.own
    }

    fn build_move(&self, _kind: Piece, src: u8, dst: Square) -> Move {
        let src_sq = Square::from_index(src);
        let capture = self.position.piece_on(dst).map(|p| (p, dst));
        Move::encode(self.position.flags_word(), src_sq, dst, None, capture)
    }

    fn build_pawn_move(&self, src: u8, dst: Square, promo: Option<Piece>) -> Move {
        let src_sq = Square::from_index(src);
        let capture = if let Some(captured) = self.position.piece_on(dst) {
            Some((captured, dst))
        } else if src_sq.file() != dst.file() {
            let cap_rank = match self.color {
                Color::White => dst.rank() - 1,
                Color::Black => dst.rank() + 1,
            };
            Some((Piece::Pawn, Square::from_file_rank(dst.file(), cap_rank)))
        } else {
            None
        };
        Move::encode(self.position.flags_word(), src_sq, dst, promo, capture)
    }

    fn next_castle(&mut self) -> Option<Move> {
        loop {
            match self.castle_stage {
                0 => {
                    self.castle_stage = 1;
                    if let Some(mv) = self.try_castle(CastleSide::King) {
                        return Some(mv);
                    }
                }
                1 => {
                    self.castle_stage = 2;
                    if let Some(mv) = self.try_castle(CastleSide::Queen) {
                        return Some(mv);
                    }
                }
                _ => return None,
            }
        }
    }

    fn try_castle(&self, side: CastleSide) -> Option<Move> {
        if !self.position.castling_rights(self.color, side) {
            return None;
        }
        if self.occupancy & castle_between_mask(self.color, side) != 0 {
            return None;
        }
        let king_sq = self.position.king_square(self.color);
        let dest = castle_destination(self.color, side);
        if !square_control::is_legal_castling(self.position, self.color, dest, self.tables) {
            return None;
        }
        Some(Move::encode(self.position.flags_word(), king_sq, dest, None, None))
    }
}
