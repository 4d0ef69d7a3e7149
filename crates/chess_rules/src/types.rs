use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Row delta of a pawn step. White plays up the board (towards row 0).
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
    pub fn back_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
    pub fn pawn_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
    /// Row a pawn of this color must stand on to capture en passant.
    pub fn en_passant_row(self) -> i8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Kinds a pawn may be replaced with on the last row.
    pub fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// A piece on the board (or in a capture list).
///
/// `square` is the back-reference to the cell holding the piece; for captured
/// pieces it is the square they were taken on. `has_moved` is the one-shot
/// flag pawns use for the double step and kings/rooks use for castling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            color,
            kind,
            square,
            has_moved: false,
        }
    }

    /// Uppercase for white, lowercase for black.
    pub fn symbol(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// One of the 64 squares, stored row-major.
///
/// Rows count down from the top edge: row 0 is black's back rank (algebraic
/// rank 8) and row 7 is white's (rank 1). Files run a..h as 0..7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square(u8);

impl Square {
    /// Panics on coordinates outside 0..8; those indicate a bug in the caller.
    pub fn new(file: u8, row: u8) -> Self {
        assert!(
            file < 8 && row < 8,
            "square coordinates out of range: file {file}, row {row}"
        );
        Square(row * 8 + file)
    }

    pub fn from_coords(file: i8, row: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&row) {
            Some(Square((row as u8) * 8 + file as u8))
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Self {
        assert!(idx < 64, "square index out of range: {idx}");
        Square(idx as u8)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
    pub fn file(self) -> i8 {
        (self.0 % 8) as i8
    }
    pub fn row(self) -> i8 {
        (self.0 / 8) as i8
    }

    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::from_coords(self.file() + df, self.row() + dr)
    }

    /// Light squares are the ones where file + row is even (a8, h1, ...).
    pub fn shade(self) -> Color {
        if (self.file() + self.row()) % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file() as u8) as char;
        let rank = (b'8' - self.row() as u8) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return Err(RulesError::InvalidSquare(s.to_string()));
        }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return Err(RulesError::InvalidSquare(s.to_string()));
        }
        Ok(Square::new(f - b'a', b'8' - r))
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = RulesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Shorthand for algebraic squares in setup code and tests.
///
/// Panics on malformed input.
pub fn sq(name: &str) -> Square {
    name.parse()
        .unwrap_or_else(|_| panic!("invalid square literal: {name}"))
}
