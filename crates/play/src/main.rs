mod command;
mod session;
mod settings;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use command::Command;
use session::Session;
use settings::Settings;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Optional first argument: path to a TOML settings file.
    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match Settings::load(&path) {
            Ok(s) => {
                info!(path = %path.display(), "loaded settings");
                s
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "cannot load settings");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let mut session = match Session::new(settings) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "cannot set up the game");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", session.game().board()).ok();
    stdout.flush().ok();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                writeln!(stdout, "{e}").ok();
                stdout.flush().ok();
                continue;
            }
        };
        match session.handle(cmd, &mut stdout) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!(error = %e, "stdout closed");
                break;
            }
        }
        stdout.flush().ok();
    }
    ExitCode::SUCCESS
}
