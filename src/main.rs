//! Tile-Go: a Go rule engine.
//!
//! ## Usage
//!
//! - `tile-go` - Play a random demo game
//! - `tile-go gtp` - Start GTP server for GUI integration
//! - `tile-go gtp --width 19 --height 19 --komi 7.5` - GTP server with a starting board
//! - `tile-go demo --seed 7` - Random demo game with a fixed seed
//! - `tile-go replay game.txt` - Replay a move list and print the result

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tile_go::constants::{HISTORY_MAX, PASS_MOVE};
use tile_go::gtp::GtpEngine;
use tile_go::history::MoveRecord;
use tile_go::playout::{last_stone, random_game};
use tile_go::position::{
    Color, GameConfig, Move, Position, format_vertex, from_index, parse_vertex, to_index,
};

/// Tile-Go: a Go rule engine for tick-driven hosts
#[derive(Parser)]
#[command(name = "tile-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Play a random game and print the final board
    Demo {
        #[command(flatten)]
        board: BoardArgs,
        /// Seed for the random move generator
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many moves
        #[arg(long, default_value_t = HISTORY_MAX)]
        max_moves: usize,
    },
    /// Replay a move list (`B D4` / `W pass` per line) and print the board
    Replay {
        #[command(flatten)]
        board: BoardArgs,
        /// File with one move per line
        path: PathBuf,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Board width
    #[arg(long, default_value_t = 9)]
    width: u8,
    /// Board height
    #[arg(long, default_value_t = 9)]
    height: u8,
    /// Komi (compensation for White)
    #[arg(long, default_value_t = 6.5)]
    komi: f32,
}

impl BoardArgs {
    fn config(&self) -> Result<GameConfig> {
        let config = GameConfig::new(self.width, self.height, GameConfig::komi2_from(self.komi));
        config.validate().context("invalid board size")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so GTP responses on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tile_go=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp { board }) => {
            let mut engine = GtpEngine::with_config(board.config()?)?;
            engine.run()
        }
        Some(Commands::Demo {
            board,
            seed,
            max_moves,
        }) => run_demo(board.config()?, seed, max_moves),
        Some(Commands::Replay { board, path }) => run_replay(board.config()?, &path),
        None => run_demo(GameConfig::square(9), None, HISTORY_MAX),
    }
}

fn run_demo(config: GameConfig, seed: Option<u64>, max_moves: usize) -> Result<()> {
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    info!(seed, "starting random game");

    let mut pos = Position::new(config)?;
    let mut rng = fastrand::Rng::with_seed(seed);
    let end = random_game(&mut pos, &mut rng, max_moves);

    println!("Tile-Go: random game (seed {seed})\n");
    print_summary(&pos);
    println!("Ended by: {end:?}");
    Ok(())
}

fn run_replay(config: GameConfig, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records = parse_records(&text, config.width, config.height)?;

    let pos = Position::replay(config, &records)
        .with_context(|| format!("failed to replay {}", path.display()))?;
    print_summary(&pos);
    Ok(())
}

/// Parse `<color> <vertex>` lines, skipping blanks and `#` comments.
fn parse_records(text: &str, width: u8, height: u8) -> Result<Vec<MoveRecord>> {
    let mut records = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(color), Some(vertex), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("line {}: expected '<color> <vertex>'", n + 1);
        };
        let color = Color::parse(color)
            .with_context(|| format!("line {}: unknown color '{color}'", n + 1))?;
        let point = match parse_vertex(vertex, width, height)
            .with_context(|| format!("line {}", n + 1))?
        {
            Move::Pass => PASS_MOVE,
            Move::Play { col, row } => to_index(col, row),
        };
        records.push(MoveRecord { point, color });
    }
    Ok(records)
}

fn print_summary(pos: &Position) {
    println!("{pos}");
    println!("Moves played: {}", pos.move_count());
    println!(
        "Stones: {} black, {} white",
        pos.stone_count(Color::Black),
        pos.stone_count(Color::White)
    );
    if let Some(last) = pos.history().last() {
        let mv = if last.is_pass() {
            Move::Pass
        } else {
            let (col, row) = from_index(last.point);
            Move::Play { col, row }
        };
        println!("Last move: {} {}", last.color.letter(), format_vertex(mv, pos.height()));
    }
    if let Some((col, row)) = last_stone(pos) {
        println!("Last stone: {}", format_vertex(Move::Play { col, row }, pos.height()));
    }
    if let Some((col, row)) = pos.ko() {
        println!("Ko: {}", format_vertex(Move::Play { col, row }, pos.height()));
    }
    println!("To play: {}", pos.color_to_play());
}
