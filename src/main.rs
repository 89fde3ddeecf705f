use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use shape_connect::ai::GreedyAgent;
use shape_connect::config::GameConfig;
use shape_connect::game::{GameState, Piece, Player, Shape};

/// Play dual-attribute Connect Four against the computer.
#[derive(Parser)]
#[command(name = "shape-connect", about = "Connect four by color OR by shape")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override board dimension
    #[arg(long)]
    size: Option<usize>,

    /// Override RNG seed for the computer player
    #[arg(long)]
    seed: Option<u64>,

    /// Override pause before the computer's move, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(seed) = cli.seed {
        config.ai.seed = Some(seed);
    }
    if let Some(delay) = cli.delay_ms {
        config.ai.delay_ms = delay;
    }
    config.validate()?;

    let mut state = GameState::new(config.board_size);
    state.set_selected_shape(config.starting_shape);
    let mut agent = match config.ai.seed {
        Some(seed) => GreedyAgent::seeded(seed),
        None => GreedyAgent::new(),
    };

    println!("shape-connect — four in a row by color OR by shape wins.");
    println!("Commands: <column>, shape <name>, restart, quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_board(&state);
        if state.is_over() {
            print_result(&state);
            print!("Play again? [y/N] ");
            io::stdout().flush()?;
            match lines.next() {
                Some(line) => {
                    if line?.trim().eq_ignore_ascii_case("y") {
                        state.reset();
                        continue;
                    }
                    return Ok(());
                }
                None => return Ok(()),
            }
        }

        print!(
            "Your move (shape: {}, columns 0-{}): ",
            state.selected_shape(),
            state.board().size() - 1
        );
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        match parse_command(line.trim()) {
            Command::Quit => return Ok(()),
            Command::Restart => {
                state.reset();
                info!("game restarted");
            }
            Command::SelectShape(shape) => {
                state.set_selected_shape(shape);
                println!("Shape set to {shape}.");
            }
            Command::Drop(col) => {
                let piece = Piece::new(Player::Human, state.selected_shape());
                match state.drop_piece(col, piece) {
                    Ok((row, col)) => {
                        info!("player dropped {} at ({row}, {col})", piece.shape);
                    }
                    Err(err) => {
                        println!("Rejected: {err}");
                        continue;
                    }
                }

                if state.is_over() {
                    continue;
                }

                // The pause is cosmetic; the search itself is instant.
                thread::sleep(Duration::from_millis(config.ai.delay_ms));
                let mv = agent
                    .choose_move(state.board(), state.selected_shape())
                    .context("computer asked to move on a full board")?;
                let piece = Piece::new(Player::Computer, mv.shape);
                let (row, col) = state
                    .drop_piece(mv.column, piece)
                    .context("computer chose an unplayable column")?;
                info!("computer dropped {} at ({row}, {col})", mv.shape);
            }
            Command::Unknown(input) => {
                println!("Unrecognized input '{input}'. Commands: <column>, shape <name>, restart, quit");
            }
        }
    }
}

enum Command {
    Drop(usize),
    SelectShape(Shape),
    Restart,
    Quit,
    Unknown(String),
}

fn parse_command(input: &str) -> Command {
    if let Ok(col) = input.parse::<usize>() {
        return Command::Drop(col);
    }
    match input.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["quit"] | ["q"] | ["exit"] => Command::Quit,
        ["restart"] => Command::Restart,
        ["shape", name] => match name.parse::<Shape>() {
            Ok(shape) => Command::SelectShape(shape),
            Err(_) => Command::Unknown(input.to_string()),
        },
        _ => Command::Unknown(input.to_string()),
    }
}

fn print_board(state: &GameState) {
    let size = state.board().size();
    println!();
    for row in 0..size {
        let mut line = String::new();
        for col in 0..size {
            match state.cell(row, col) {
                Some(piece) => {
                    let owner = match piece.owner {
                        Player::Human => 'P',
                        Player::Computer => 'C',
                    };
                    line.push(owner);
                    line.push(piece.shape.glyph());
                }
                None => line.push_str(" ."),
            }
            line.push(' ');
        }
        println!("{line}");
    }
    for col in 0..size {
        print!(" {col} ");
    }
    println!();
}

fn print_result(state: &GameState) {
    match (state.winner(), state.win_condition()) {
        (Some(winner), Some(condition)) => {
            println!("{} wins by {}!", winner.name(), condition.name());
        }
        _ => println!("Draw — the board is full."),
    }
}
