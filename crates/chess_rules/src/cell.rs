//! Squares of the grid and the ray-casts sliding pieces share.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub square: Square,
    pub shade: Color,
    pub occupant: Option<Piece>,
    /// Highlight flag for the presentation layer. Never read by the rules.
    pub available: bool,
}

impl Cell {
    pub fn new(square: Square) -> Self {
        Self {
            square,
            shade: square.shade(),
            occupant: None,
            available: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// True when the cell holds a piece of the opposite color to `color`.
    pub fn is_enemy_of(&self, color: Color) -> bool {
        matches!(self.occupant, Some(pc) if pc.color != color)
    }
}

impl Board {
    /// Same file, nothing strictly between.
    pub fn clear_path_vertical(&self, from: Square, to: Square) -> bool {
        if from == to || from.file() != to.file() {
            return false;
        }
        self.clear_between(from, to)
    }

    /// Same row, nothing strictly between.
    pub fn clear_path_horizontal(&self, from: Square, to: Square) -> bool {
        if from == to || from.row() != to.row() {
            return false;
        }
        self.clear_between(from, to)
    }

    /// Same diagonal, nothing strictly between.
    pub fn clear_path_diagonal(&self, from: Square, to: Square) -> bool {
        let df = to.file() - from.file();
        let dr = to.row() - from.row();
        if df == 0 || df.abs() != dr.abs() {
            return false;
        }
        self.clear_between(from, to)
    }

    // Callers guarantee the squares are distinct and aligned.
    fn clear_between(&self, from: Square, to: Square) -> bool {
        let df = (to.file() - from.file()).signum();
        let dr = (to.row() - from.row()).signum();
        let mut cur = from.offset(df, dr);
        while let Some(s) = cur {
            if s == to {
                return true;
            }
            if !self.cell(s).is_empty() {
                return false;
            }
            cur = s.offset(df, dr);
        }
        false
    }
}

#[cfg(test)]
#[path = "cell_tests.rs"]
mod tests;
