//! Error types for parsing and move application.

use std::error::Error;
use std::fmt;

/// Errors produced when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The FEN did not have the expected number of fields.
    WrongFieldCount { found: usize },
    /// The piece placement field was malformed.
    InvalidPlacement { found: String },
    /// A rank described more or fewer than eight squares.
    InvalidRankWidth { rank: usize },
    /// The placement did not have exactly one king per side.
    InvalidKingCount { white: u32, black: u32 },
    /// The side-to-move field was not `w` or `b`.
    InvalidSideToMove { found: String },
    /// The castling field held a character other than `KQkq` or `-`.
    InvalidCastling { found: String },
    /// The en passant field was not a square or `-`.
    InvalidEnPassant { found: String },
    /// The halfmove clock was not a non-negative integer.
    InvalidHalfmoveClock { found: String },
    /// The fullmove number was not a positive integer.
    InvalidFullmoveNumber { found: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::WrongFieldCount { found } => {
                write!(f, "expected 4 to 6 FEN fields, found {found}")
            }
            ParseError::InvalidPlacement { found } => {
                write!(f, "invalid piece placement: {found}")
            }
            ParseError::InvalidRankWidth { rank } => {
                write!(f, "rank {rank} does not describe exactly 8 squares")
            }
            ParseError::InvalidKingCount { white, black } => {
                write!(
                    f,
                    "expected exactly one king per side, found {white} white and {black} black"
                )
            }
            ParseError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move: {found}")
            }
            ParseError::InvalidCastling { found } => {
                write!(f, "invalid castling field: {found}")
            }
            ParseError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant field: {found}")
            }
            ParseError::InvalidHalfmoveClock { found } => {
                write!(f, "invalid halfmove clock: {found}")
            }
            ParseError::InvalidFullmoveNumber { found } => {
                write!(f, "invalid fullmove number: {found}")
            }
        }
    }
}

impl Error for ParseError {}

/// Errors produced when resolving a UCI move string against a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// UCI moves are four or five characters.
    InvalidLength { found: usize },
    /// A square token was not a valid coordinate.
    InvalidSquare { found: String },
    /// The promotion suffix was not one of `qrbn`.
    InvalidPromotion { found: char },
    /// The move is well formed but not legal in this position.
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { found } => {
                write!(f, "expected 4 or 5 characters, found {found}")
            }
            MoveParseError::InvalidSquare { found } => {
                write!(f, "invalid square: {found}")
            }
            MoveParseError::InvalidPromotion { found } => {
                write!(f, "invalid promotion piece: {found}")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "illegal move: {notation}")
            }
        }
    }
}

impl Error for MoveParseError {}

/// A move rejected by [`Position::apply`](super::Position::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalMoveError {
    /// UCI notation of the rejected move.
    pub notation: String,
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move: {}", self.notation)
    }
}

impl Error for IllegalMoveError {}

/// Errors produced when constructing a square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank outside 0..8.
    RankOutOfBounds { rank: usize },
    /// File outside 0..8.
    FileOutOfBounds { file: usize },
    /// A coordinate string that is not of the form `e4`.
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "rank {rank} out of bounds")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "file {file} out of bounds")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation: {notation}")
            }
        }
    }
}

impl Error for SquareError {}
