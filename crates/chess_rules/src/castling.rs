//! Castling preconditions and rook bookkeeping.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Side implied by the king's file delta (+2 towards h, -2 towards a).
    pub fn from_delta(df: i8) -> CastleSide {
        if df > 0 {
            CastleSide::KingSide
        } else {
            CastleSide::QueenSide
        }
    }

    pub fn rook_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// File the rook lands on, next to the king on the inside.
    pub fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    pub fn rook_squares(self, row: i8) -> (Square, Square) {
        (
            Square::new(self.rook_file(), row as u8),
            Square::new(self.rook_target_file(), row as u8),
        )
    }

    fn step(self) -> i8 {
        match self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }
}

impl Board {
    /// Whether the king on `king_sq` may castle towards `side` right now.
    ///
    /// All of the following must hold: the king has never moved; the corner
    /// rook is present, same color and has never moved; every square between
    /// them is empty; the king is not in check; neither the square it crosses
    /// nor the square it lands on is attacked.
    pub fn can_castle(&self, king_sq: Square, side: CastleSide) -> bool {
        let Some(king) = self.piece_at(king_sq) else {
            return false;
        };
        if king.kind != PieceKind::King || king.has_moved {
            return false;
        }
        // Rook target squares assume the king starts on the e-file of its
        // own back row.
        if king_sq.file() != 4 || king_sq.row() != king.color.back_row() {
            return false;
        }

        let (rook_sq, _) = side.rook_squares(king_sq.row());
        match self.piece_at(rook_sq) {
            Some(rook)
                if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved => {}
            _ => return false,
        }

        if !self.clear_path_horizontal(king_sq, rook_sq) {
            return false;
        }

        // Attack scans go through `attacks`, never `reachable`, so an
        // opposing king only counts by adjacency and cannot recurse back
        // into its own castling check.
        let step = side.step();
        let path = [Some(king_sq), king_sq.offset(step, 0), king_sq.offset(2 * step, 0)];
        path.iter()
            .all(|s| matches!(s, Some(s) if !self.is_attacked(*s, king.color)))
    }
}

#[cfg(test)]
#[path = "castling_tests.rs"]
mod tests;
