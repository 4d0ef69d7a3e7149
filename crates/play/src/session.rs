use std::io::{self, Write};

use tracing::{debug, warn};

use chess_rules::{Game, GameStatus, MoveOutcome};

use crate::command::{Command, HELP};
use crate::settings::Settings;

/// One console game: the engine state plus the options it was started with.
pub struct Session {
    game: Game,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> chess_rules::error::Result<Self> {
        let game = Game::from_config(&settings.game)?;
        Ok(Self { game, settings })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run one command, writing its reply to `out`. Returns false on `quit`.
    pub fn handle(&mut self, cmd: Command, out: &mut impl Write) -> io::Result<bool> {
        match cmd {
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let choice = promotion.or(self.settings.play.default_promotion);
                match self.game.play(from, to, choice) {
                    MoveOutcome::Rejected => writeln!(out, "illegal move {from}{to}")?,
                    MoveOutcome::Completed(record) => {
                        debug!(%from, %to, special = ?record.special, "console move");
                        self.after_move(out)?;
                    }
                    MoveOutcome::AwaitingPromotion(_) => {
                        writeln!(out, "pawn on {to} awaits promotion (promote q|r|b|n)")?;
                    }
                }
            }
            Command::Promote(kind) => match self.game.promote(kind) {
                Ok(()) => self.after_move(out)?,
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Moves(square) => {
                let targets = self.game.select(Some(square));
                if targets.is_empty() {
                    writeln!(out, "no legal moves from {square}")?;
                } else {
                    let list: Vec<String> = targets.iter().map(|s| s.to_string()).collect();
                    writeln!(out, "{square}: {}", list.join(" "))?;
                    if self.settings.play.show_board {
                        writeln!(out, "{}", self.game.board())?;
                    }
                    self.game.select(None);
                }
            }
            Command::Undo => {
                if self.game.undo() {
                    self.after_move(out)?;
                } else {
                    writeln!(out, "nothing to undo")?;
                }
            }
            Command::Board => writeln!(out, "{}", self.game.board())?,
            Command::Json => match serde_json::to_string(&self.game.board().snapshot()) {
                Ok(json) => writeln!(out, "{json}")?,
                Err(e) => warn!(error = %e, "snapshot serialization failed"),
            },
            Command::Placement => writeln!(out, "{}", self.game.board().placement())?,
            Command::Status => self.write_status(out)?,
            Command::New => match Game::from_config(&self.settings.game) {
                Ok(game) => {
                    self.game = game;
                    self.after_move(out)?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn after_move(&self, out: &mut impl Write) -> io::Result<()> {
        if self.settings.play.show_board {
            writeln!(out, "{}", self.game.board())?;
        }
        self.write_status(out)
    }

    fn write_status(&self, out: &mut impl Write) -> io::Result<()> {
        let side = format!("{:?}", self.game.side_to_move()).to_lowercase();
        match self.game.status() {
            GameStatus::Playing => writeln!(out, "{side} to move"),
            GameStatus::Check => writeln!(out, "{side} to move, in check"),
            GameStatus::Checkmate { winner } => {
                writeln!(out, "checkmate, {} wins", format!("{winner:?}").to_lowercase())
            }
            GameStatus::Stalemate => writeln!(out, "stalemate"),
            GameStatus::AwaitingPromotion => writeln!(out, "{side} must choose a promotion"),
        }
    }
}
