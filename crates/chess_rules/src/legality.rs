//! King safety: attacked squares, check, and the simulate-and-revert probe
//! every move goes through before it is exposed as legal.

use tracing::trace;

use crate::board::Board;
use crate::types::*;

impl Board {
    /// Square of the `color` king.
    ///
    /// Panics if there is none: a board without both kings is a setup bug,
    /// not a game state.
    pub fn king_square(&self, color: Color) -> Square {
        self.cells
            .iter()
            .find_map(|c| match c.occupant {
                Some(pc) if pc.color == color && pc.kind == PieceKind::King => Some(c.square),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no {color:?} king on the board"))
    }

    /// True if any piece not of `defender`'s color attacks `target`.
    pub fn is_attacked(&self, target: Square, defender: Color) -> bool {
        self.cells.iter().any(|c| match c.occupant {
            Some(pc) if pc.color != defender => self.attacks(c.square, target),
            _ => false,
        })
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color)
    }

    /// Play `from -> to` in place, ask whether the mover's king is attacked,
    /// then put both cells (and an en passant victim) back exactly as they
    /// were. Does not check reachability; callers pair it with `reachable`.
    pub fn is_legal(&mut self, from: Square, to: Square) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        // Landing on a friendly piece is never legal, and probing it could
        // lift the mover's own king off the board.
        if matches!(self.piece_at(to), Some(t) if t.color == piece.color) {
            return false;
        }
        let saved_from = self.cells[from.index()].occupant;
        let saved_to = self.cells[to.index()].occupant;
        let lifted = if piece.kind == PieceKind::Pawn && self.en_passant_capture(piece, from, to) {
            let beside = Square::new(to.file() as u8, from.row() as u8);
            Some((beside, self.cells[beside.index()].occupant))
        } else {
            None
        };

        if let Some((s, _)) = lifted {
            self.cells[s.index()].occupant = None;
        }
        self.cells[from.index()].occupant = None;
        self.cells[to.index()].occupant = Some(Piece { square: to, ..piece });

        let exposed = self.is_in_check(piece.color);

        self.cells[to.index()].occupant = saved_to;
        self.cells[from.index()].occupant = saved_from;
        if let Some((s, occupant)) = lifted {
            self.cells[s.index()].occupant = occupant;
        }

        !exposed
    }

    pub fn has_any_legal_move(&mut self, color: Color) -> bool {
        let friendly: Vec<Square> = self.pieces(color).map(|pc| pc.square).collect();
        let mut probed = 0usize;
        for from in friendly {
            for to in Square::all() {
                if self.reachable(from, to) {
                    probed += 1;
                    if self.is_legal(from, to) {
                        trace!(%from, %to, ?color, "legal move found");
                        return true;
                    }
                }
            }
        }
        trace!(?color, probed, "no legal move");
        false
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        if !self.is_in_check(color) {
            return false;
        }
        let mut scratch = self.clone();
        !scratch.has_any_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        if self.is_in_check(color) {
            return false;
        }
        let mut scratch = self.clone();
        !scratch.has_any_legal_move(color)
    }

    /// Squares the piece on `from` may legally move to, cloning the board
    /// once for the probes.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        let mut scratch = self.clone();
        let mut out = Vec::with_capacity(28);
        scratch.legal_targets_into(from, &mut out);
        out
    }

    /// Like `legal_targets`, reusing the caller's buffer and probing in place.
    pub fn legal_targets_into(&mut self, from: Square, out: &mut Vec<Square>) {
        out.clear();
        for to in Square::all() {
            if self.reachable(from, to) && self.is_legal(from, to) {
                out.push(to);
            }
        }
    }

    /// Set every cell's `available` flag to whether the piece on `selected`
    /// may legally move there. `None` clears all flags.
    pub fn highlight(&mut self, selected: Option<Square>) {
        let mut targets = Vec::new();
        if let Some(from) = selected {
            self.legal_targets_into(from, &mut targets);
        }
        for cell in self.cells.iter_mut() {
            cell.available = targets.contains(&cell.square);
        }
    }
}

#[cfg(test)]
#[path = "legality_tests.rs"]
mod tests;
