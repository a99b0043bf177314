//! Forsyth-Edwards Notation parsing and emission.

use super::Position;
use crate::error::FenError;
use crate::square::{Color, Piece, Square};

impl Position {
    /// Parses a FEN string. The trailing halfmove/fullmove counters are
    /// read and discarded; this crate does not track them.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewFields);
        }

        let mut position = Position::new_empty();
        parse_piece_placement(&mut position, parts[0])?;
        parse_side_to_move(&mut position, parts[1])?;
        parse_castling_rights(&mut position, parts[2])?;
        parse_en_passant(&mut position, parts[3])?;
        Ok(position)
    }

    /// Emits a FEN string. Halfmove/fullmove counters are emitted as the
    /// fixed placeholder `0 1`, since this crate does not track them.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(64);

        for rank in (0..8u8).rev() {
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let sq = Square::from_file_rank(file, rank);
                match (self.piece_on(sq), self.color_on(sq)) {
                    (Some(piece), Some(color)) => {
                        if empty_run > 0 {
                            out.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        let c = piece.to_white_char();
                        out.push(match color {
                            Color::White => c,
                            Color::Black => c.to_ascii_lowercase(),
                        });
                    }
                    _ => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push((b'0' + empty_run) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let mut any_castle = false;
        if self.castling_rights(Color::White, crate::square::CastleSide::King) {
            out.push('K');
            any_castle = true;
        }
        if self.castling_rights(Color::White, crate::square::CastleSide::Queen) {
            out.push('Q');
            any_castle = true;
        }
        if self.castling_rights(Color::Black, crate::square::CastleSide::King) {
            out.push('k');
            any_castle = true;
        }
        if self.castling_rights(Color::Black, crate::square::CastleSide::Queen) {
            out.push('q');
            any_castle = true;
        }
        if !any_castle {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant_target() {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(" 0 1");
        out
    }
}

fn parse_piece_placement(position: &mut Position, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }
    // FEN ranks are listed top-down (rank 8 first).
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(d) = c.to_digit(10) {
                file = file
                    .checked_add(d as u8)
                    .filter(|&f| f <= 8)
                    .ok_or(FenError::DigitOverflow)?;
                continue;
            }
            if file >= 8 {
                return Err(FenError::BadRankLength(file as usize + 1));
            }
            let (color, piece) = char_to_piece(c).ok_or(FenError::InvalidPieceChar(c))?;
            position.put_piece(color, piece, Square::from_file_rank(file, rank));
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength(file as usize));
        }
    }
    Ok(())
}

fn parse_side_to_move(position: &mut Position, s: &str) -> Result<(), FenError> {
    match s {
        "w" => Ok(()),
        "b" => {
            position.flip_side_to_move();
            Ok(())
        }
        other => Err(FenError::InvalidSideToMove(other.to_string())),
    }
}

fn parse_castling_rights(position: &mut Position, s: &str) -> Result<(), FenError> {
    if s == "-" {
        return Ok(());
    }
    for c in s.chars() {
        match c {
            'K' => position.set_castling_bit(super::flags::CASTLE_WK, true),
            'Q' => position.set_castling_bit(super::flags::CASTLE_WQ, true),
            'k' => position.set_castling_bit(super::flags::CASTLE_BK, true),
            'q' => position.set_castling_bit(super::flags::CASTLE_BQ, true),
            other => return Err(FenError::InvalidCastlingChar(other)),
        }
    }
    Ok(())
}

fn parse_en_passant(position: &mut Position, s: &str) -> Result<(), FenError> {
    if s == "-" {
        position.set_en_passant(None);
        return Ok(());
    }
    let sq: Square = s
        .parse()
        .map_err(|_| FenError::InvalidEnPassant(s.to_string()))?;
    position.set_en_passant(Some(sq));
    Ok(())
}

fn char_to_piece(c: char) -> Option<(Color, Piece)> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let piece = match c.to_ascii_uppercase() {
        'K' => Piece::King,
        'P' => Piece::Pawn,
        'N' => Piece::Knight,
        'R' => Piece::Rook,
        'B' => Piece::Bishop,
        'Q' => Piece::Queen,
        _ => return None,
    };
    Some((color, piece))
}
