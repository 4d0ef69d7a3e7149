//! Game setup loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::placement::STANDARD_PLACEMENT;
use crate::types::Color;

/// How a new game starts.
///
/// ```toml
/// placement = "4k3/8/8/8/8/8/8/4K2R"
/// first_to_move = "white"
/// history_limit = 256
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Piece placement, FEN style, rank 8 first.
    pub placement: String,
    pub first_to_move: Color,
    /// Number of plies `Game::undo` can step back. Zero disables undo.
    pub history_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            placement: STANDARD_PLACEMENT.to_string(),
            first_to_move: Color::White,
            history_limit: 256,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let cfg = GameConfig::from_toml_str(
            r#"
            placement = "4k3/8/8/8/8/8/8/4K3"
            first_to_move = "black"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.placement, "4k3/8/8/8/8/8/8/4K3");
        assert_eq!(cfg.first_to_move, Color::Black);
        assert_eq!(cfg.history_limit, 256);
    }

    #[test]
    fn unknown_color_is_a_parse_error() {
        let err = GameConfig::from_toml_str("first_to_move = \"green\"").unwrap_err();
        assert!(matches!(err, crate::RulesError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::load(Path::new("/nonexistent/chess_rules.toml")).unwrap_err();
        assert!(matches!(err, crate::RulesError::ConfigRead(_)));
    }
}
