//! FEN parsing and formatting, plus UCI move resolution.
//!
//! Parsing is strict: malformed placement, counters, or fields are
//! reported as errors rather than papered over. `to_fen` emits the real
//! halfmove clock and fullmove number, so parse/format round-trips are
//! exact.

use std::str::FromStr;

use super::error::{MoveParseError, ParseError};
use super::types::{file_to_index, rank_to_index, Color, Move, Piece, Square};
use super::Position;

impl Position {
    /// Parse a position from a FEN string.
    ///
    /// The halfmove clock and fullmove number may be omitted (defaulting
    /// to 0 and 1), matching the common 4-field EPD form.
    pub fn try_from_fen(fen: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 || parts.len() > 6 {
            return Err(ParseError::WrongFieldCount { found: parts.len() });
        }

        let mut position = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseError::InvalidPlacement {
                found: parts[0].to_string(),
            });
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i; // FEN lists rank 8 first
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(ParseError::InvalidPlacement {
                            found: rank_str.to_string(),
                        });
                    }
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or_else(|| ParseError::InvalidPlacement {
                        found: rank_str.to_string(),
                    })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(ParseError::InvalidRankWidth { rank: rank + 1 });
                    }
                    position.set_piece(Square(rank, file), color, piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(ParseError::InvalidRankWidth { rank: rank + 1 });
            }
        }

        // Move generation assumes one king of each color on the board
        let white_kings = position.pieces_of(Color::White, Piece::King).popcount();
        let black_kings = position.pieces_of(Color::Black, Piece::King).popcount();
        if white_kings != 1 || black_kings != 1 {
            return Err(ParseError::InvalidKingCount {
                white: white_kings,
                black: black_kings,
            });
        }

        position.white_to_move = match parts[1] {
            "w" => true,
            "b" => false,
            other => {
                return Err(ParseError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => position.castling.set(Color::White, true),
                    'Q' => position.castling.set(Color::White, false),
                    'k' => position.castling.set(Color::Black, true),
                    'q' => position.castling.set(Color::Black, false),
                    _ => {
                        return Err(ParseError::InvalidCastling {
                            found: parts[2].to_string(),
                        })
                    }
                }
            }
        }

        if parts[3] != "-" {
            let chars: Vec<char> = parts[3].chars().collect();
            let valid = chars.len() == 2
                && ('a'..='h').contains(&chars[0])
                && (chars[1] == '3' || chars[1] == '6');
            if !valid {
                return Err(ParseError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            position.en_passant_target =
                Some(Square(rank_to_index(chars[1]), file_to_index(chars[0])));
        }

        if let Some(&field) = parts.get(4) {
            position.halfmove_clock =
                field.parse().map_err(|_| ParseError::InvalidHalfmoveClock {
                    found: field.to_string(),
                })?;
        }
        if let Some(&field) = parts.get(5) {
            let number: u32 = field.parse().map_err(|_| ParseError::InvalidFullmoveNumber {
                found: field.to_string(),
            })?;
            if number == 0 {
                return Err(ParseError::InvalidFullmoveNumber {
                    found: field.to_string(),
                });
            }
            position.fullmove_number = number;
        }

        position.hash = position.compute_hash();
        position.repetitions.set(position.hash, 1);
        Ok(position)
    }

    /// Parse a position from a FEN string, panicking on malformed input.
    ///
    /// Convenient for tests and fixed positions; use
    /// [`try_from_fen`](Self::try_from_fen) for untrusted data.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(position) => position,
            Err(err) => panic!("invalid FEN {fen:?}: {err}"),
        }
    }

    /// Format the position as a FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from_digit(empty, 10).unwrap_or('0'));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.white_to_move { 'w' } else { 'b' });

        fen.push(' ');
        let mut rights = String::new();
        if self.castling.has(Color::White, true) {
            rights.push('K');
        }
        if self.castling.has(Color::White, false) {
            rights.push('Q');
        }
        if self.castling.has(Color::Black, true) {
            rights.push('k');
        }
        if self.castling.has(Color::Black, false) {
            rights.push('q');
        }
        if rights.is_empty() {
            fen.push('-');
        } else {
            fen.push_str(&rights);
        }

        fen.push(' ');
        match self.en_passant_target {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// Resolve a UCI move string (`e2e4`, `e7e8q`) against this position.
    ///
    /// The move is matched against the legal move list, so the result
    /// carries full piece/capture/kind information.
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = uci.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(MoveParseError::InvalidLength { found: chars.len() });
        }

        let from_text: String = chars[0..2].iter().collect();
        let from: Square = from_text
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare { found: from_text })?;
        let to_text: String = chars[2..4].iter().collect();
        let to: Square = to_text
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare { found: to_text })?;
        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match c.to_ascii_lowercase() {
                'q' => Some(Piece::Queen),
                'r' => Some(Piece::Rook),
                'b' => Some(Piece::Bishop),
                'n' => Some(Piece::Knight),
                _ => return Err(MoveParseError::InvalidPromotion { found: c }),
            },
        };

        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse and apply a UCI move in one step, returning the resolved move.
    pub fn apply_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.make(mv);
        Ok(mv)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_fen(s)
    }
}
