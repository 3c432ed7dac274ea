//! Chess - play a two-player game in the terminal.
//!
//! Reads one command per line from stdin and forwards moves to the engine.
//! Logging goes to stderr and is controlled with `RUST_LOG`.

mod command;
mod config;
mod display;

use chess_engine::{Game, GameStatus, Position, StandardChess};
use clap::Parser;
use command::Command;
use config::ChessConfig;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Two-player chess with full rule enforcement")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = ChessConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,
}

const HELP: &str = "\
commands:
  e2e4, e7e8n      move in coordinate notation (optional promotion letter)
  6 4 4 4          move by source row/col and destination row/col
  board            show the board
  status           show whose turn it is and the game status
  history          list the moves played
  moves            list the legal moves
  reset            start a new game
  quit             leave";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let config = ChessConfig::load(&args.config)?;
    let rules = StandardChess::new(config.rules.promotion.into());
    let mut game = match &args.fen {
        Some(fen) => Game::from_position(rules, Position::from_fen(fen)?),
        None => Game::with_rules(rules),
    };
    tracing::info!("Promotion policy: {:?}", rules.promotion);

    let coordinates = config.display.coordinates;
    print!("{}", display::render(&game.position().board, coordinates));
    print_status(&game);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Move {
                from,
                to,
                promotion,
            } => match game.try_move(from, to, promotion) {
                Ok(_) => {
                    print!("{}", display::render(&game.position().board, coordinates));
                    print_status(&game);
                }
                Err(e) => eprintln!("{}", e),
            },
            Command::Raw {
                src_row,
                src_col,
                dst_row,
                dst_col,
            } => {
                let outcome = game.submit_move(src_row, src_col, dst_row, dst_col);
                if outcome.accepted {
                    print!("{}", display::render(&game.position().board, coordinates));
                    print_status(&game);
                } else {
                    eprintln!("move rejected ({})", outcome.status);
                }
            }
            Command::Board => print!("{}", display::render(&game.position().board, coordinates)),
            Command::Status => print_status(&game),
            Command::History => {
                let history: Vec<String> =
                    game.move_history().iter().map(|m| m.to_uci()).collect();
                println!("{}", history.join(" "));
            }
            Command::Moves => {
                let moves: Vec<String> = game
                    .legal_moves()
                    .as_slice()
                    .iter()
                    .map(|m| m.to_uci())
                    .collect();
                println!("{}", moves.join(" "));
            }
            Command::Reset => {
                game.reset();
                print!("{}", display::render(&game.position().board, coordinates));
                print_status(&game);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn print_status(game: &Game) {
    let status = game.current_status();
    match status {
        GameStatus::InProgress => println!("{} to move", game.side_to_move()),
        GameStatus::Check => println!("{} to move, in check", game.side_to_move()),
        GameStatus::Checkmate => println!("checkmate, {} wins", game.side_to_move().opposite()),
        GameStatus::Stalemate => println!("stalemate, draw"),
    }
}
