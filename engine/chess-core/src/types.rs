//! Primitive chess types: colors, pieces, squares and castling rights.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side to move / piece ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// One-letter code used in notation and position keys.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A colored piece. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

/// A board coordinate. Row 0 is Black's back rank (rank 8), row 7 is
/// White's (rank 1), matching the row/col convention of the move
/// descriptors callers exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Build a square from in-range coordinates.
    ///
    /// # Panics
    /// Debug-panics when either coordinate is out of range; use
    /// [`Square::try_new`] for offset arithmetic.
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8, "square ({row}, {col}) off the board");
        Self { row, col }
    }

    /// Build a square from signed coordinates, `None` when off the board.
    #[inline]
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Offset by a (row, col) delta, `None` when off the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Parse coordinate notation ("e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = 8 - (rank as u8 - b'0');
        Some(Self { row, col })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

/// Castling availability, four flags packed in a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights(u8);

const WHITE_KINGSIDE: u8 = 0b0001;
const WHITE_QUEENSIDE: u8 = 0b0010;
const BLACK_KINGSIDE: u8 = 0b0100;
const BLACK_QUEENSIDE: u8 = 0b1000;

impl CastlingRights {
    /// All four rights intact (starting position).
    pub fn all() -> Self {
        Self(WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE)
    }

    /// No rights (custom test positions).
    pub fn none() -> Self {
        Self(0)
    }

    fn kingside_bit(color: Color) -> u8 {
        match color {
            Color::White => WHITE_KINGSIDE,
            Color::Black => BLACK_KINGSIDE,
        }
    }

    fn queenside_bit(color: Color) -> u8 {
        match color {
            Color::White => WHITE_QUEENSIDE,
            Color::Black => BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub fn kingside(self, color: Color) -> bool {
        self.0 & Self::kingside_bit(color) != 0
    }

    #[inline]
    pub fn queenside(self, color: Color) -> bool {
        self.0 & Self::queenside_bit(color) != 0
    }

    pub fn revoke_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_bit(color);
    }

    pub fn revoke_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_bit(color);
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke_kingside(color);
        self.revoke_queenside(color);
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}
