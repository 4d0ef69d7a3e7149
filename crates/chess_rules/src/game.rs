//! Turn order and game status on top of the board rules.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, MoveOutcome, MoveRecord};
use crate::config::GameConfig;
use crate::error::Result;
use crate::types::*;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
    /// A pawn reached its last row; `Game::promote` completes the ply.
    AwaitingPromotion,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    status: GameStatus,
    /// Positions before each executed ply, oldest first.
    history: VecDeque<(Board, Color)>,
    history_limit: usize,
    last_move: Option<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position, white to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        let mut game = Game {
            board,
            side_to_move,
            status: GameStatus::Playing,
            history: VecDeque::new(),
            history_limit: GameConfig::default().history_limit,
            last_move: None,
        };
        game.status = game.evaluate_status();
        game
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let board = Board::from_placement(&config.placement)?;
        let mut game = Self::from_board(board, config.first_to_move);
        game.history_limit = config.history_limit;
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.status,
            GameStatus::Checkmate { .. } | GameStatus::Stalemate
        )
    }

    /// Play `from -> to` for the side to move.
    ///
    /// When the move puts a pawn on its last row and `promotion` names a
    /// valid piece, the promotion is applied at once and the outcome is
    /// `Completed`. Otherwise the game waits in `AwaitingPromotion`.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveOutcome {
        if self.is_over() || self.status == GameStatus::AwaitingPromotion {
            return MoveOutcome::Rejected;
        }
        match self.board.piece_at(from) {
            Some(pc) if pc.color == self.side_to_move => {}
            _ => return MoveOutcome::Rejected,
        }

        let before = self.board.clone();
        let outcome = self.board.move_piece(from, to);
        match outcome {
            MoveOutcome::Rejected => outcome,
            MoveOutcome::Completed(record) => {
                if let Some(kind) = promotion {
                    debug!(%from, %to, ?kind, "promotion choice ignored, move does not promote");
                }
                self.remember(before);
                self.last_move = Some(record);
                self.finish_ply();
                outcome
            }
            MoveOutcome::AwaitingPromotion(record) => {
                self.remember(before);
                self.last_move = Some(record);
                self.status = GameStatus::AwaitingPromotion;
                let Some(kind) = promotion else {
                    return outcome;
                };
                match self.promote(kind) {
                    Ok(()) => MoveOutcome::Completed(record),
                    Err(e) => {
                        debug!(error = %e, "promotion choice refused, still pending");
                        outcome
                    }
                }
            }
        }
    }

    /// Resolve a pending promotion and hand the move to the other side.
    pub fn promote(&mut self, kind: PieceKind) -> Result<()> {
        self.board.promote(kind)?;
        self.finish_ply();
        Ok(())
    }

    /// Step back one executed ply. Returns false with nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some((board, side)) = self.history.pop_back() else {
            return false;
        };
        self.board = board;
        self.side_to_move = side;
        self.last_move = None;
        self.status = self.evaluate_status();
        true
    }

    /// Highlight the legal targets of the side-to-move piece on `square`
    /// and return them. Anything else clears the highlight.
    pub fn select(&mut self, square: Option<Square>) -> Vec<Square> {
        let selectable = match square {
            Some(s) if !self.is_over() && self.status != GameStatus::AwaitingPromotion => {
                matches!(self.board.piece_at(s), Some(pc) if pc.color == self.side_to_move)
            }
            _ => false,
        };
        if !selectable {
            self.board.highlight(None);
            return Vec::new();
        }
        self.board.highlight(square);
        self.board
            .cells()
            .iter()
            .filter(|c| c.available)
            .map(|c| c.square)
            .collect()
    }

    fn remember(&mut self, mut before: Board) {
        if self.history_limit == 0 {
            return;
        }
        before.highlight(None);
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back((before, self.side_to_move));
    }

    fn finish_ply(&mut self) {
        self.board.highlight(None);
        self.side_to_move = self.side_to_move.other();
        self.status = self.evaluate_status();
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.board.pending_promotion().is_some() {
            return GameStatus::AwaitingPromotion;
        }
        let side = self.side_to_move;
        let in_check = self.board.is_in_check(side);
        let mut scratch = self.board.clone();
        let can_move = scratch.has_any_legal_move(side);

        match (in_check, can_move) {
            (true, false) => {
                info!(loser = ?side, "checkmate");
                GameStatus::Checkmate {
                    winner: side.other(),
                }
            }
            (false, false) => {
                info!(?side, "stalemate");
                GameStatus::Stalemate
            }
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Playing,
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
