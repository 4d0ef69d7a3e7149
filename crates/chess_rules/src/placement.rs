//! Board setup from the piece-placement field of FEN, and text rendering.

use std::fmt;

use crate::board::Board;
use crate::error::{Result, RulesError};
use crate::types::*;

pub const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

impl Board {
    /// Parse a placement such as `"4k3/8/8/8/8/8/8/4K2R"` (rank 8 first).
    ///
    /// The placement carries no move history, so one-shot flags are inferred:
    /// pawns off their start row, kings off their home square and rooks off
    /// their back-row corners count as moved.
    ///
    /// Each color needs exactly one king, and pawns may not stand on the
    /// first or last rank.
    pub fn from_placement(placement: &str) -> Result<Board> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(RulesError::InvalidPlacement(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, rank_str) in rows.iter().enumerate() {
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 || d > 8 {
                        return Err(RulesError::InvalidPlacement(format!(
                            "bad empty-run digit {ch:?}"
                        )));
                    }
                    file += d as u8;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or_else(|| {
                        RulesError::InvalidPlacement(format!("unknown piece {ch:?}"))
                    })?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(RulesError::InvalidPlacement(format!(
                            "too many files in rank {}",
                            8 - row
                        )));
                    }
                    let s = Square::new(file, row as u8);
                    board.place(s, color, kind);
                    if !starts_unmoved(color, kind, s) {
                        board.mark_moved(s);
                    }
                    file += 1;
                }
                if file > 8 {
                    return Err(RulesError::InvalidPlacement(format!(
                        "too many files in rank {}",
                        8 - row
                    )));
                }
            }
            if file != 8 {
                return Err(RulesError::InvalidPlacement(format!(
                    "rank {} covers {file} files",
                    8 - row
                )));
            }
        }
        board.validate()?;
        Ok(board)
    }

    /// Inverse of `from_placement` (one-shot flags are not encoded).
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..8u8 {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::new(file, row)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

fn starts_unmoved(color: Color, kind: PieceKind, s: Square) -> bool {
    match kind {
        PieceKind::Pawn => s.row() == color.pawn_row(),
        PieceKind::King => s.row() == color.back_row() && s.file() == 4,
        PieceKind::Rook => s.row() == color.back_row() && (s.file() == 0 || s.file() == 7),
        _ => true,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for file in 0..8u8 {
                let cell = self.cell(Square::new(file, row));
                let c = match cell.occupant {
                    Some(pc) => pc.symbol(),
                    None if cell.available => '*',
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "placement_tests.rs"]
mod tests;
