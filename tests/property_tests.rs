//! The invariants a conforming implementation must satisfy, checked
//! against a handful of representative positions rather than via
//! randomized generation.

use chess_core::bitboard::BitboardExt;
use chess_core::board::Position;
use chess_core::moves::square_control::{attacks_from, is_square_attacked};
use chess_core::moves::tables::{initialize_tables, tables};
use chess_core::moves::{Generator, Move};
use chess_core::square::{Color, Piece, Square};

const SAMPLE_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
    "8/P7/8/8/8/8/8/k6K w - - 0 1",
];

#[test]
fn fen_round_trips_byte_for_byte() {
    for fen in SAMPLE_FENS {
        let p = Position::from_fen(fen).unwrap();
        let round_tripped = Position::from_fen(&p.to_fen()).unwrap();
        assert_eq!(p, round_tripped, "round trip diverged for {fen}");
    }
}

#[test]
fn every_legal_move_round_trips_through_apply_and_undo() {
    initialize_tables();
    for fen in SAMPLE_FENS {
        let mut p = Position::from_fen(fen).unwrap();
        let before = p.clone();
        let mut gen = Generator::new(&mut p);
        let mut legal_moves = Vec::new();
        loop {
            let mv = gen.next();
            if mv.is_no_more_moves() {
                break;
            }
            legal_moves.push(mv);
        }
        for mv in legal_moves {
            p.apply(mv);
            p.undo(mv);
            assert_eq!(p, before, "apply/undo did not restore {fen} for {mv}");
        }
    }
}

#[test]
fn every_legal_move_round_trips_through_its_algebraic_string() {
    initialize_tables();
    for fen in SAMPLE_FENS {
        let mut p = Position::from_fen(fen).unwrap();
        let mut gen = Generator::new(&mut p);
        let mut legal_moves = Vec::new();
        loop {
            let mv = gen.next();
            if mv.is_no_more_moves() {
                break;
            }
            legal_moves.push(mv);
        }
        for mv in legal_moves {
            let parsed = Move::from_algebraic(&mv.to_algebraic(), &p).unwrap();
            assert_eq!(parsed, mv, "round trip diverged for {}", mv.to_algebraic());
        }
    }
}

#[test]
fn attack_symmetry_holds_for_every_square_and_color() {
    initialize_tables();
    let t = &tables().magic;
    let p = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();

    let occupancy = p.occupied();
    for sq_index in 0..64u8 {
        let square = Square::from_index(sq_index);
        for &color in &[Color::White, Color::Black] {
            let attacked = is_square_attacked(&p, square, color, t);

            let mut threatened_by_some_piece = false;
            for &kind in &Piece::ALL {
                let mut sources = p.pieces(color, kind);
                while sources != 0 {
                    let src = sources.pop_lsb();
                    let src_sq = Square::from_index(src);
                    if attacks_from(kind, color, src_sq, occupancy, t).test(sq_index) {
                        threatened_by_some_piece = true;
                    }
                }
            }

            assert_eq!(
                attacked, threatened_by_some_piece,
                "attack symmetry violated at {square} for {color:?}"
            );
        }
    }
}
