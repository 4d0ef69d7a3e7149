//! Per-piece movement rules.
//!
//! Every piece kind answers two questions about a target square:
//! - `reachable`: could it move there under the full rules, ignoring whether
//!   that leaves its own king attacked;
//! - `attacks`: does it threaten the square. Used only by attacked-square
//!   scans, so it never looks at king safety.

use crate::board::Board;
use crate::castling::CastleSide;
use crate::types::*;

impl Board {
    pub fn reachable(&self, from: Square, to: Square) -> bool {
        let Some(pc) = self.piece_at(from) else {
            return false;
        };
        // Own pieces block; kings are never captured, check detection keeps
        // that position from arising.
        if let Some(target) = self.piece_at(to)
            && (target.color == pc.color || target.kind == PieceKind::King)
        {
            return false;
        }

        match pc.kind {
            PieceKind::Pawn => self.pawn_reachable(pc, from, to),
            PieceKind::Knight => knight_step(from, to),
            PieceKind::Bishop => self.clear_path_diagonal(from, to),
            PieceKind::Rook => self.straight_line(from, to),
            PieceKind::Queen => self.straight_line(from, to) || self.clear_path_diagonal(from, to),
            PieceKind::King => {
                if king_step(from, to) {
                    return true;
                }
                let df = to.file() - from.file();
                !pc.has_moved
                    && from.row() == to.row()
                    && df.abs() == 2
                    && self.can_castle(from, CastleSide::from_delta(df))
            }
        }
    }

    /// Whether the piece on `from` threatens `to`, whatever stands there.
    ///
    /// The king's threat is plain adjacency. It must not go through
    /// `reachable`: castling asks whether squares are attacked, and an
    /// opposing king asking about its own castling would recurse forever.
    pub fn attacks(&self, from: Square, to: Square) -> bool {
        let Some(pc) = self.piece_at(from) else {
            return false;
        };
        match pc.kind {
            PieceKind::Pawn => {
                to.row() - from.row() == pc.color.forward() && (to.file() - from.file()).abs() == 1
            }
            PieceKind::Knight => knight_step(from, to),
            PieceKind::Bishop => self.clear_path_diagonal(from, to),
            PieceKind::Rook => self.straight_line(from, to),
            PieceKind::Queen => self.straight_line(from, to) || self.clear_path_diagonal(from, to),
            PieceKind::King => king_step(from, to),
        }
    }

    fn straight_line(&self, from: Square, to: Square) -> bool {
        self.clear_path_vertical(from, to) || self.clear_path_horizontal(from, to)
    }

    fn pawn_reachable(&self, pawn: Piece, from: Square, to: Square) -> bool {
        let dir = pawn.color.forward();
        let df = to.file() - from.file();
        let dr = to.row() - from.row();

        if df == 0 {
            if dr == dir {
                return self.cell(to).is_empty();
            }
            if dr == 2 * dir && !pawn.has_moved && from.row() == pawn.color.pawn_row() {
                let over = from
                    .offset(0, dir)
                    .expect("a pawn on its start row has a square in front");
                return self.cell(over).is_empty() && self.cell(to).is_empty();
            }
            return false;
        }

        if df.abs() == 1 && dr == dir {
            if self.cell(to).is_enemy_of(pawn.color) {
                return true;
            }
            return self.en_passant_capture(pawn, from, to);
        }
        false
    }

    /// Diagonal step onto an empty square past the enemy pawn that double
    /// stepped on the previous ply.
    pub(crate) fn en_passant_capture(&self, pawn: Piece, from: Square, to: Square) -> bool {
        if from.row() != pawn.color.en_passant_row() {
            return false;
        }
        if to.row() - from.row() != pawn.color.forward() || (to.file() - from.file()).abs() != 1 {
            return false;
        }
        if !self.cell(to).is_empty() {
            return false;
        }
        let beside = Square::new(to.file() as u8, from.row() as u8);
        if self.en_passant != Some(beside) {
            return false;
        }
        matches!(
            self.piece_at(beside),
            Some(pc) if pc.kind == PieceKind::Pawn && pc.color != pawn.color
        )
    }
}

fn knight_step(from: Square, to: Square) -> bool {
    let df = (to.file() - from.file()).abs();
    let dr = (to.row() - from.row()).abs();
    (df == 1 && dr == 2) || (df == 2 && dr == 1)
}

fn king_step(from: Square, to: Square) -> bool {
    let df = (to.file() - from.file()).abs();
    let dr = (to.row() - from.row()).abs();
    df <= 1 && dr <= 1 && (df, dr) != (0, 0)
}

#[cfg(test)]
#[path = "movement_tests.rs"]
mod tests;
