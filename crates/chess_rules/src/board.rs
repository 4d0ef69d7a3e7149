use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::castling::CastleSide;
use crate::cell::Cell;
use crate::error::{Result, RulesError};
use crate::types::*;

/// The 8x8 grid plus the board-wide state special moves feed on.
///
/// The board owns every cell and every piece by value, so `clone()` is a deep
/// copy and no cell or piece can be shared with another board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: [Cell; 64],
    /// Pieces taken, indexed by the captor's color.
    pub(crate) captures: [Vec<Piece>; 2],
    /// Square of the pawn that advanced two rows on the last ply, if any.
    pub(crate) en_passant: Option<Square>,
    pub(crate) pending_promotion: Option<Square>,
}

/// Flavour of an executed move, beyond plain displacement or capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Special {
    Normal,
    DoubleStep,
    EnPassant,
    Castle(CastleSide),
    Promotion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The mover as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: Special,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not reachable, not legal, or the board is waiting on a promotion
    /// choice. Nothing changed.
    Rejected,
    Completed(MoveRecord),
    /// The pawn stands on its last row; `Board::promote` must follow before
    /// the ply is complete.
    AwaitingPromotion(MoveRecord),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected)
    }

    pub fn record(&self) -> Option<&MoveRecord> {
        match self {
            MoveOutcome::Rejected => None,
            MoveOutcome::Completed(r) | MoveOutcome::AwaitingPromotion(r) => Some(r),
        }
    }
}

/// Immutable, serializable copy of everything the rules depend on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 64 entries, row-major from a8.
    pub cells: Vec<Option<Piece>>,
    pub captured_by_white: Vec<Piece>,
    pub captured_by_black: Vec<Piece>,
    pub en_passant: Option<Square>,
    pub pending_promotion: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: std::array::from_fn(|i| Cell::new(Square::from_index(i))),
            captures: [Vec::new(), Vec::new()],
            en_passant: None,
            pending_promotion: None,
        }
    }

    /// The standard starting position, white at the bottom.
    pub fn standard() -> Self {
        let mut b = Board::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (f, &kind) in back.iter().enumerate() {
                b.place(Square::new(f as u8, color.back_row() as u8), color, kind);
                b.place(
                    Square::new(f as u8, color.pawn_row() as u8),
                    color,
                    PieceKind::Pawn,
                );
            }
        }
        b
    }

    pub fn cell(&self, sq: Square) -> &Cell {
        &self.cells[sq.index()]
    }

    pub fn cells(&self) -> &[Cell; 64] {
        &self.cells
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].occupant
    }

    /// Every piece of `color` still on the board, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.cells
            .iter()
            .filter_map(|c| c.occupant)
            .filter(move |pc| pc.color == color)
    }

    /// Pieces `captor` has taken, in capture order.
    pub fn captured_by(&self, captor: Color) -> &[Piece] {
        &self.captures[captor.idx()]
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Put a fresh (never moved) piece on `sq`, replacing any occupant.
    pub fn place(&mut self, sq: Square, color: Color, kind: PieceKind) -> &mut Self {
        self.put(sq, Piece::new(color, kind, sq));
        self
    }

    /// Clear the never-moved flag of the piece on `sq`.
    pub fn mark_moved(&mut self, sq: Square) -> &mut Self {
        if let Some(pc) = self.cells[sq.index()].occupant.as_mut() {
            pc.has_moved = true;
        }
        self
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].occupant.take()
    }

    /// Record `sq` as the pawn that just made a double step. Setup only.
    pub fn set_en_passant(&mut self, sq: Option<Square>) -> &mut Self {
        self.en_passant = sq;
        self
    }

    pub(crate) fn put(&mut self, sq: Square, mut pc: Piece) {
        pc.square = sq;
        self.cells[sq.index()].occupant = Some(pc);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.iter().map(|c| c.occupant).collect(),
            captured_by_white: self.captures[Color::White.idx()].clone(),
            captured_by_black: self.captures[Color::Black.idx()].clone(),
            en_passant: self.en_passant,
            pending_promotion: self.pending_promotion,
        }
    }

    pub fn from_snapshot(snap: &Snapshot) -> Result<Board> {
        if snap.cells.len() != 64 {
            return Err(RulesError::InvalidPlacement(format!(
                "snapshot has {} cells, expected 64",
                snap.cells.len()
            )));
        }
        let mut b = Board::empty();
        for (i, occupant) in snap.cells.iter().enumerate() {
            if let Some(pc) = occupant {
                b.put(Square::from_index(i), *pc);
            }
        }
        b.captures = [
            snap.captured_by_white.clone(),
            snap.captured_by_black.clone(),
        ];
        b.en_passant = snap.en_passant;
        b.pending_promotion = snap.pending_promotion;
        b.validate()?;
        Ok(b)
    }

    /// Setup checks for boards built from outside input: one king per color,
    /// and no pawn on the first or last row except one waiting to promote.
    pub(crate) fn validate(&self) -> Result<()> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces(color)
                .filter(|pc| pc.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(RulesError::InvalidPlacement(format!(
                    "{color:?} has {kings} kings, expected 1"
                )));
            }
        }

        if let Some(s) = self.pending_promotion {
            match self.piece_at(s) {
                Some(pc) if pc.kind == PieceKind::Pawn && s.row() == pc.color.promotion_row() => {}
                _ => {
                    return Err(RulesError::InvalidPlacement(format!(
                        "no pawn waiting to promote on {s}"
                    )));
                }
            }
        }

        let stray = self.cells.iter().find(|c| {
            matches!(c.occupant, Some(pc) if pc.kind == PieceKind::Pawn)
                && (c.square.row() == 0 || c.square.row() == 7)
                && Some(c.square) != self.pending_promotion
        });
        if let Some(c) = stray {
            return Err(RulesError::InvalidPlacement(format!(
                "pawn on {} cannot stand on the first or last rank",
                c.square
            )));
        }
        Ok(())
    }

    /// Execute `from -> to` if it is reachable and does not leave the mover's
    /// king attacked. Rejections leave the board untouched.
    pub fn move_piece(&mut self, from: Square, to: Square) -> MoveOutcome {
        if self.pending_promotion.is_some() {
            trace!(%from, %to, "move rejected: promotion pending");
            return MoveOutcome::Rejected;
        }
        let Some(piece) = self.piece_at(from) else {
            trace!(%from, %to, "move rejected: empty square");
            return MoveOutcome::Rejected;
        };
        if !self.reachable(from, to) || !self.is_legal(from, to) {
            trace!(%from, %to, kind = ?piece.kind, "move rejected");
            return MoveOutcome::Rejected;
        }

        let mut special = self.classify(piece, from, to);
        let captured = match special {
            Special::EnPassant => self.remove(Square::new(to.file() as u8, from.row() as u8)),
            _ => self.remove(to),
        };

        self.remove(from);
        let mut moved = piece;
        moved.has_moved = true;
        self.put(to, moved);

        if let Special::Castle(side) = special {
            let (rook_from, rook_to) = side.rook_squares(from.row());
            let mut rook = self
                .remove(rook_from)
                .expect("castling was validated with a rook on the corner");
            rook.has_moved = true;
            self.put(rook_to, rook);
        }

        self.en_passant = match special {
            Special::DoubleStep => Some(to),
            _ => None,
        };

        if let Some(victim) = captured {
            self.captures[piece.color.idx()].push(victim);
        }

        let awaiting = piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row();
        if awaiting {
            special = Special::Promotion;
            self.pending_promotion = Some(to);
        }

        let record = MoveRecord {
            from,
            to,
            piece,
            captured,
            special,
        };
        debug!(
            %from,
            %to,
            kind = ?piece.kind,
            color = ?piece.color,
            captured = ?captured.map(|c| c.kind),
            special = ?special,
            "move executed"
        );

        if awaiting {
            MoveOutcome::AwaitingPromotion(record)
        } else {
            MoveOutcome::Completed(record)
        }
    }

    fn classify(&self, piece: Piece, from: Square, to: Square) -> Special {
        let df = to.file() - from.file();
        let dr = to.row() - from.row();
        match piece.kind {
            PieceKind::Pawn if dr.abs() == 2 => Special::DoubleStep,
            PieceKind::Pawn if df != 0 && self.cell(to).is_empty() => Special::EnPassant,
            PieceKind::King if df.abs() == 2 => Special::Castle(CastleSide::from_delta(df)),
            _ => Special::Normal,
        }
    }

    /// Replace the pawn waiting on its last row with `kind`.
    pub fn promote(&mut self, kind: PieceKind) -> Result<Square> {
        let sq = self
            .pending_promotion
            .ok_or(RulesError::NoPendingPromotion)?;
        if !kind.is_promotion_choice() {
            return Err(RulesError::InvalidPromotion(kind));
        }
        let pawn = self
            .piece_at(sq)
            .expect("pending promotion square holds the pawn");
        self.put(
            sq,
            Piece {
                kind,
                has_moved: true,
                ..pawn
            },
        );
        self.pending_promotion = None;
        debug!(square = %sq, ?kind, color = ?pawn.color, "pawn promoted");
        Ok(sq)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
