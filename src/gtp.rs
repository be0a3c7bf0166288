//! Go Text Protocol (GTP) front-end.
//!
//! A text input collaborator for the rule engine: a GUI or a script sends
//! moves for either colour and the engine answers with their legality. The
//! engine does not generate moves.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return GTP protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set a square board size in [5, 19]
//! - `rectangular_boardsize <width> <height>` - Set a rectangular board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi
//! - `play <color> <vertex>` - Play a move
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//!
//! ## Example
//!
//! ```
//! use tile_go::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! let mut out = Vec::new();
//! engine.run_with("play b D4\nshowboard\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("= \n"));
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::position::{Color, GameConfig, Move, Position, column_letter, format_vertex, parse_vertex};
use crate::session::{Action, Session};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "rectangular_boardsize",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    session: Session,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create a GTP engine on a 19x19 board with 6.5 komi.
    pub fn new() -> Self {
        Self {
            session: Session::default(),
        }
    }

    /// Create a GTP engine with the given board size and komi.
    pub fn with_config(config: GameConfig) -> Result<Self> {
        let session = Session::new(config).context("invalid board configuration")?;
        Ok(Self { session })
    }

    pub fn position(&self) -> &Position {
        self.session.position()
    }

    /// Run the GTP command loop on stdin and stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock(), io::stdout())
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                debug!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Start a fresh game with `config`.
    fn new_game(&mut self, config: GameConfig) -> (bool, String) {
        match self.session.new_game(config, ()) {
            Ok(()) => (true, String::new()),
            Err(e) => (false, format!("unacceptable size: {e}")),
        }
    }

    /// Execute a GTP command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<u8>() {
                    Ok(size) => self.new_game(GameConfig {
                        width: size,
                        height: size,
                        ..self.position().config()
                    }),
                    Err(_) => (false, "unacceptable size".to_string()),
                }
            }

            "rectangular_boardsize" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                match (args[0].parse::<u8>(), args[1].parse::<u8>()) {
                    (Ok(width), Ok(height)) => self.new_game(GameConfig {
                        width,
                        height,
                        ..self.position().config()
                    }),
                    _ => (false, "unacceptable size".to_string()),
                }
            }

            "clear_board" => self.new_game(self.position().config()),

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) => {
                        self.session.set_komi2(GameConfig::komi2_from(komi));
                        (true, String::new())
                    }
                    Err(_) => (false, "syntax error".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = Color::parse(args[0]) else {
                    return (false, "syntax error".to_string());
                };
                let pos = self.session.position();
                let mv = match parse_vertex(args[1], pos.width(), pos.height()) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };

                match self.session.tick(Some(Action { mv, color }), ()) {
                    Some(result) if result.is_legal() => (true, String::new()),
                    Some(result) => (false, result.to_string()),
                    None => (false, "illegal move".to_string()),
                }
            }

            "undo" => match self.session.undo(()) {
                Ok(true) => (true, String::new()),
                Ok(false) => (false, "cannot undo".to_string()),
                Err(e) => {
                    warn!(error = %e, "history replay failed");
                    (false, "cannot undo".to_string())
                }
            },

            "showboard" => (true, self.board_text()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Board diagram with GTP coordinates around it.
    fn board_text(&self) -> String {
        let pos = self.session.position();
        let letters: Vec<String> = (0..pos.width())
            .map(|col| column_letter(col).to_string())
            .collect();
        let header = format!("   {}", letters.join(" "));

        let mut out = String::new();
        out.push('\n');
        out.push_str(&header);
        out.push('\n');
        for (row, line) in pos.to_string().lines().enumerate() {
            let number = pos.height() as usize - row;
            out.push_str(&format!("{number:>2} {line} {number}\n"));
        }
        out.push_str(&header);
        if let Some((col, row)) = pos.ko() {
            let ko = format_vertex(Move::Play { col, row }, pos.height());
            out.push_str(&format!("\nko: {ko}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Occupant;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = GtpEngine::new();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "tile-go");
    }

    #[test]
    fn test_protocol_version() {
        let mut engine = GtpEngine::new();
        let (success, response) = engine.execute("protocol_version", &[]);
        assert!(success);
        assert_eq!(response, "2");
    }

    #[test]
    fn test_known_command() {
        let mut engine = GtpEngine::new();

        let (success, response) = engine.execute("known_command", &["play"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = GtpEngine::new();

        let (success, _) = engine.execute("boardsize", &["9"]);
        assert!(success);
        assert_eq!(engine.position().width(), 9);

        let (success, _) = engine.execute("boardsize", &["25"]);
        assert!(!success);
        assert_eq!(engine.position().width(), 9);

        let (success, _) = engine.execute("rectangular_boardsize", &["7", "5"]);
        assert!(success);
        assert_eq!(engine.position().width(), 7);
        assert_eq!(engine.position().height(), 5);
    }

    #[test]
    fn test_komi_applies_to_current_game() {
        let mut engine = GtpEngine::new();
        engine.execute("play", &["b", "D4"]);

        let (success, _) = engine.execute("komi", &["7.5"]);
        assert!(success);
        assert_eq!(engine.position().komi2(), 15);
        assert_eq!(engine.position().move_count(), 1);

        // Kept across new games until changed again.
        engine.execute("clear_board", &[]);
        assert_eq!(engine.position().komi2(), 15);
        engine.execute("boardsize", &["9"]);
        assert_eq!(engine.position().komi2(), 15);

        assert!(!engine.execute("komi", &["lots"]).0);
        assert_eq!(engine.position().komi2(), 15);
    }

    #[test]
    fn test_with_config() {
        let engine = GtpEngine::with_config(GameConfig::new(9, 7, 0)).unwrap();
        assert_eq!(engine.position().width(), 9);
        assert_eq!(engine.position().height(), 7);
        assert_eq!(engine.position().komi2(), 0);

        assert!(GtpEngine::with_config(GameConfig::square(21)).is_err());
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = GtpEngine::new();

        let (success, _) = engine.execute("play", &["black", "D4"]);
        assert!(success);
        assert_eq!(engine.position().occupant(3, 15), Some(Occupant::Black));

        let (success, response) = engine.execute("play", &["white", "D4"]);
        assert!(!success);
        assert!(response.contains("not playable"));

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.position().move_count(), 0);
    }

    #[test]
    fn test_play_rejects_bad_input() {
        let mut engine = GtpEngine::new();
        assert!(!engine.execute("play", &["green", "D4"]).0);
        assert!(!engine.execute("play", &["b", "Z99"]).0);
        assert!(!engine.execute("play", &["b"]).0);
        assert!(engine.execute("play", &["b", "pass"]).0);
        assert_eq!(engine.position().move_count(), 1);
    }

    #[test]
    fn test_undo() {
        let mut engine = GtpEngine::new();
        assert!(!engine.execute("undo", &[]).0);
        engine.execute("play", &["b", "Q16"]);
        assert!(engine.execute("undo", &[]).0);
        assert_eq!(engine.position().move_count(), 0);
    }

    #[test]
    fn test_showboard() {
        let mut engine = GtpEngine::new();
        engine.execute("boardsize", &["9"]);
        engine.execute("play", &["b", "A9"]);
        let (success, board) = engine.execute("showboard", &[]);
        assert!(success);
        assert!(board.contains("   A B C D E F G H J"));
        assert!(board.contains(" 9 X . . . . . . . . 9"));
    }

    #[test]
    fn test_run_with_ids() {
        let mut engine = GtpEngine::new();
        let mut out = Vec::new();
        engine
            .run_with("1 name\n# comment\n2 play w pass\n3 quit\n4 name\n".as_bytes(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "=1 tile-go\n\n=2 \n\n=3 \n\n");
    }
}
