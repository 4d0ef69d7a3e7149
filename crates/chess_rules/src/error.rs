//! Errors for setup, configuration and promotion choices.
//!
//! Ordinary gameplay never produces these: an illegal move is rejected with
//! `MoveOutcome::Rejected` and invariant breaches (no king, coordinates off
//! the board) panic.

use thiserror::Error;

use crate::types::PieceKind;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    #[error("failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RulesError>;
