use std::fmt;

/// Parse error for Forsyth-Edwards Notation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than 4 whitespace-separated fields.
    TooFewFields,
    /// A rank in the piece-placement field didn't sum to exactly 8 files.
    BadRankLength(usize),
    /// A digit run would overflow past file h.
    DigitOverflow,
    /// A character in the piece-placement field is not a recognized piece letter or digit.
    InvalidPieceChar(char),
    /// The side-to-move field was not `w` or `b`.
    InvalidSideToMove(String),
    /// A character in the castling field was not one of `KQkq-`.
    InvalidCastlingChar(char),
    /// The en-passant field was not `-` or a valid algebraic square.
    InvalidEnPassant(String),
    /// Piece placement had the wrong number of ranks (must be 8).
    WrongRankCount(usize),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields => write!(f, "FEN has fewer than 4 fields"),
            FenError::BadRankLength(n) => write!(f, "rank describes {n} files, expected 8"),
            FenError::DigitOverflow => write!(f, "digit run overflows past file h"),
            FenError::InvalidPieceChar(c) => write!(f, "invalid piece character '{c}'"),
            FenError::InvalidSideToMove(s) => write!(f, "invalid side to move '{s}'"),
            FenError::InvalidCastlingChar(c) => write!(f, "invalid castling character '{c}'"),
            FenError::InvalidEnPassant(s) => write!(f, "invalid en-passant square '{s}'"),
            FenError::WrongRankCount(n) => write!(f, "piece placement has {n} ranks, expected 8"),
        }
    }
}

impl std::error::Error for FenError {}

/// Parse error for pure coordinate algebraic move notation (`e2e4`, `e7e8q`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// String is too short or too long to be `<sq><sq>[promo]`.
    BadLength,
    /// Source or destination square text did not parse as an algebraic square.
    BadSquare(String),
    /// Promotion letter was not one of `n`, `b`, `r`, `q`.
    BadPromotionPiece(char),
    /// No piece sits on the source square.
    NoPieceOnSource,
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::BadLength => write!(f, "move string has the wrong length"),
            MoveParseError::BadSquare(s) => write!(f, "invalid square '{s}'"),
            MoveParseError::BadPromotionPiece(c) => write!(f, "invalid promotion piece '{c}'"),
            MoveParseError::NoPieceOnSource => write!(f, "no piece on source square"),
        }
    }
}

impl std::error::Error for MoveParseError {}
