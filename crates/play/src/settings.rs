//! Driver configuration: a `[game]` table for the engine plus `[play]`
//! options for the console itself.
//!
//! ```toml
//! [game]
//! placement = "4k3/P7/8/8/8/8/8/4K3"
//! first_to_move = "white"
//!
//! [play]
//! default_promotion = "queen"
//! show_board = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use chess_rules::error::Result;
use chess_rules::{GameConfig, PieceKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub play: PlayOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayOptions {
    /// Applied when a move reaches the last rank without a piece letter.
    /// With none set the game waits for `promote`.
    pub default_promotion: Option<PieceKind>,
    /// Redraw the board after every accepted move.
    pub show_board: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            default_promotion: None,
            show_board: true,
        }
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
