use std::str::FromStr;

use thiserror::Error;

use chess_rules::{PieceKind, Square};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
    #[error("not a square: {0:?}")]
    Square(String),
    #[error("not a promotion piece: {0:?}")]
    Piece(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    Promote(PieceKind),
    Moves(Square),
    Undo,
    Board,
    Json,
    Placement,
    Status,
    New,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  move <from> <to> [piece]   play a move, e.g. `move e7 e8 q`
  promote <piece>            resolve a pending promotion
  moves <square>             list and highlight legal targets
  undo                       take back the last ply
  board                      draw the board
  json                       print a JSON snapshot of the board
  placement                  print the piece placement (FEN field)
  status                     side to move and game status
  new                        restart from the configured position
  quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            return Err(CommandError::Unknown(String::new()));
        };

        let cmd = match name {
            "move" | "m" => match args {
                [from, to] => Command::Move {
                    from: square(from)?,
                    to: square(to)?,
                    promotion: None,
                },
                [from, to, piece] => Command::Move {
                    from: square(from)?,
                    to: square(to)?,
                    promotion: Some(promotion_piece(piece)?),
                },
                _ => {
                    return Err(CommandError::Arguments {
                        command: "move",
                        expected: "<from> <to> [piece]",
                    });
                }
            },
            "promote" => match args {
                [piece] => Command::Promote(promotion_piece(piece)?),
                _ => {
                    return Err(CommandError::Arguments {
                        command: "promote",
                        expected: "<piece>",
                    });
                }
            },
            "moves" => match args {
                [s] => Command::Moves(square(s)?),
                _ => {
                    return Err(CommandError::Arguments {
                        command: "moves",
                        expected: "<square>",
                    });
                }
            },
            "undo" => Command::Undo,
            "board" | "d" => Command::Board,
            "json" => Command::Json,
            "placement" | "fen" => Command::Placement,
            "status" => Command::Status,
            "new" => Command::New,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(cmd)
    }
}

fn square(s: &str) -> Result<Square, CommandError> {
    s.parse().map_err(|_| CommandError::Square(s.to_string()))
}

/// Accepts a piece letter (`q`) or name (`queen`), any case.
pub fn promotion_piece(s: &str) -> Result<PieceKind, CommandError> {
    let lower = s.to_ascii_lowercase();
    let kind = match lower.as_str() {
        "queen" => Some(PieceKind::Queen),
        "rook" => Some(PieceKind::Rook),
        "bishop" => Some(PieceKind::Bishop),
        "knight" => Some(PieceKind::Knight),
        _ if lower.len() == 1 => lower.chars().next().and_then(PieceKind::from_char),
        _ => None,
    };
    kind.filter(|k| k.is_promotion_choice())
        .ok_or_else(|| CommandError::Piece(s.to_string()))
}
