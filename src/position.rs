//! Go position representation and move execution.
//!
//! This module provides the core game logic:
//! - Board state stored as three bit fields over a padded grid
//! - Stone placement and capture detection
//! - Suicide rejection and simple ko enforcement
//! - Turn derivation from the move history
//!
//! Points are indices into the padded grid described in [`crate::constants`].
//! The margin ring is never playable, so the four neighbours of any on-board
//! point can be read without bounds checks.

use std::fmt;

use crate::bitfield::Bitfield;
use crate::constants::*;
use crate::error::{ConfigError, ReplayError, VertexError};
use crate::group::{Scratch, neighbors};
use crate::history::{History, MoveRecord};
use crate::render::{Occupant, Renderer};

/// A point on the board, represented as an index into the padded grid.
pub type Point = u16;

/// Stone colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-letter form used by GTP and SGF (`B`/`W`).
    pub fn letter(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    /// Parse `b`, `black`, `w` or `white` (any case).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A move request in user coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Pass,
    Play { col: u8, row: u8 },
}

/// Outcome of [`Position::play_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    Legal,
    /// Off the board or already occupied
    NotPlayable,
    /// Leaves the placed stone's group without liberties and captures nothing
    Suicidal,
    /// Immediate recapture of a single stone at the ko point
    KoViolation,
    /// The move history has no room for another record
    HistoryFull,
}

impl Legality {
    pub fn is_legal(self) -> bool {
        self == Legality::Legal
    }
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Legality::Legal => write!(f, "legal"),
            Legality::NotPlayable => write!(f, "illegal move: point not playable"),
            Legality::Suicidal => write!(f, "illegal move: suicide"),
            Legality::KoViolation => write!(f, "illegal move: retakes ko"),
            Legality::HistoryFull => write!(f, "illegal move: history full"),
        }
    }
}

/// Board dimensions and komi for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Twice the komi, so half-point komi stays integral.
    pub komi2: i8,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: MAX_SIZE,
            height: MAX_SIZE,
            komi2: 13,
        }
    }
}

impl GameConfig {
    pub fn new(width: u8, height: u8, komi2: i8) -> Self {
        GameConfig {
            width,
            height,
            komi2,
        }
    }

    pub fn square(size: u8) -> Self {
        GameConfig {
            width: size,
            height: size,
            ..Self::default()
        }
    }

    /// Convert a komi such as `6.5` into its doubled integer form.
    pub fn komi2_from(komi: f32) -> i8 {
        (komi * 2.0).round().clamp(i8::MIN as f32, i8::MAX as f32) as i8
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        Ok(())
    }
}

/// Convert board coordinates `(col, row)` to a padded-grid point.
///
/// The margin offset is applied here, so `(0, 0)` maps to the first cell
/// inside the sentinel ring.
#[inline]
pub fn to_index(col: u8, row: u8) -> Point {
    (row as Point + MARGIN) * EXTENT + col as Point + MARGIN
}

/// Inverse of [`to_index`] for on-board points.
///
/// Margin points and points past the grid have no coordinates; callers
/// holding an untrusted point check it against [`Position::on_board`] first.
#[inline]
pub fn from_index(pt: Point) -> (u8, u8) {
    let col = pt % EXTENT - MARGIN;
    let row = pt / EXTENT - MARGIN;
    (col as u8, row as u8)
}

/// A Go position (board state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    width: u8,
    height: u8,
    komi2: i8,
    /// Ko point, [`PASS_MOVE`] if none
    ko: Point,
    on_board: Bitfield,
    black_stones: Bitfield,
    white_stones: Bitfield,
    history: History,
}

impl Default for Position {
    /// Empty 19x19 board with 6.5 komi.
    fn default() -> Self {
        let mut pos = Position {
            width: 0,
            height: 0,
            komi2: 0,
            ko: PASS_MOVE,
            on_board: Bitfield::new(),
            black_stones: Bitfield::new(),
            white_stones: Bitfield::new(),
            history: History::new(),
        };
        pos.clear(GameConfig::default());
        pos
    }
}

impl Position {
    /// Create an empty position.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut pos = Position::default();
        pos.clear(config);
        Ok(pos)
    }

    /// Reset to an empty board of the given dimensions.
    ///
    /// Clears stones, ko and history. On error the position is untouched.
    pub fn reset(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.clear(config);
        Ok(())
    }

    /// Reset with an already validated configuration.
    fn clear(&mut self, config: GameConfig) {
        self.width = config.width;
        self.height = config.height;
        self.komi2 = config.komi2;
        self.ko = PASS_MOVE;
        self.history.clear();

        self.on_board.clear_all();
        self.black_stones.clear_all();
        self.white_stones.clear_all();

        // Step by one per column and by EXTENT per row.
        let mut pos = to_index(0, 0);
        for _row in 0..self.height {
            let mut p = pos;
            for _col in 0..self.width {
                self.on_board.set(p);
                p += 1;
            }
            pos += EXTENT;
        }
    }

    /// Rebuild a position by playing `records` on an empty board.
    pub fn replay(config: GameConfig, records: &[MoveRecord]) -> Result<Self, ReplayError> {
        let mut pos = Position::new(config)?;
        let mut scratch = Scratch::new();
        for (index, record) in records.iter().enumerate() {
            let mv = if record.is_pass() {
                Move::Pass
            } else if (record.point as usize) < DATA_LEN && pos.on_board.get(record.point) {
                let (col, row) = from_index(record.point);
                Move::Play { col, row }
            } else {
                // Margin or out-of-grid points have no board coordinates.
                return Err(ReplayError::Rejected {
                    index,
                    legality: Legality::NotPlayable,
                });
            };
            let legality = pos.play_move(mv, record.color, &mut scratch, ());
            if !legality.is_legal() {
                return Err(ReplayError::Rejected { index, legality });
            }
        }
        Ok(pos)
    }

    // -- Accessors --

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn komi2(&self) -> i8 {
        self.komi2
    }

    /// Change the komi of the game in progress. Stones and history are kept.
    pub fn set_komi2(&mut self, komi2: i8) {
        self.komi2 = komi2;
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.width, self.height, self.komi2)
    }

    /// Raw ko point, [`PASS_MOVE`] when there is none.
    pub fn ko_point(&self) -> Point {
        self.ko
    }

    /// Ko point in board coordinates.
    pub fn ko(&self) -> Option<(u8, u8)> {
        (self.ko != PASS_MOVE).then(|| from_index(self.ko))
    }

    /// Number of moves played, passes included.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn on_board(&self) -> &Bitfield {
        &self.on_board
    }

    pub fn stones(&self, color: Color) -> &Bitfield {
        match color {
            Color::Black => &self.black_stones,
            Color::White => &self.white_stones,
        }
    }

    fn stones_mut(&mut self, color: Color) -> &mut Bitfield {
        match color {
            Color::Black => &mut self.black_stones,
            Color::White => &mut self.white_stones,
        }
    }

    pub fn in_bounds(&self, col: u8, row: u8) -> bool {
        col < self.width && row < self.height
    }

    /// Occupant of `(col, row)`, or `None` outside the board.
    pub fn occupant(&self, col: u8, row: u8) -> Option<Occupant> {
        if !self.in_bounds(col, row) {
            return None;
        }
        Some(self.occupant_at(to_index(col, row)))
    }

    fn occupant_at(&self, pt: Point) -> Occupant {
        if self.black_stones.get(pt) {
            Occupant::Black
        } else if self.white_stones.get(pt) {
            Occupant::White
        } else {
            Occupant::Empty
        }
    }

    pub fn stone_count(&self, color: Color) -> u32 {
        self.stones(color).count()
    }

    /// Colour to move next, derived from the history.
    pub fn color_to_play(&self) -> Color {
        self.history.color_to_play()
    }

    /// Cheap playability test for UI previews.
    ///
    /// False on the ko point or an occupied point. Does not detect suicide,
    /// so it may return true where [`Position::play_move`] would answer
    /// [`Legality::Suicidal`].
    pub fn can_play_approx(&self, col: u8, row: u8) -> bool {
        if !self.in_bounds(col, row) {
            return false;
        }
        let pt = to_index(col, row);
        if pt == self.ko {
            return false;
        }
        !(self.black_stones.get(pt) || self.white_stones.get(pt))
    }

    /// Full legality test, suicide included. Plays the move on a copy.
    pub fn check_move(&self, mv: Move, color: Color, scratch: &mut Scratch) -> Legality {
        self.clone().play_move(mv, color, scratch, ())
    }

    // -- Game actions --

    /// Play a move for `color`.
    ///
    /// On [`Legality::Legal`] the board, ko and history are updated and
    /// `renderer` is told about every changed cell: each captured stone
    /// (now empty) followed by the placed stone. Any other result leaves the
    /// position exactly as it was and emits nothing.
    ///
    /// Passing is always legal while the history has room; it clears the ko.
    pub fn play_move<R: Renderer>(
        &mut self,
        mv: Move,
        color: Color,
        scratch: &mut Scratch,
        mut renderer: R,
    ) -> Legality {
        if self.history.is_full() {
            return Legality::HistoryFull;
        }

        let (col, row) = match mv {
            Move::Pass => {
                self.ko = PASS_MOVE;
                self.history.push(MoveRecord {
                    point: PASS_MOVE,
                    color,
                });
                return Legality::Legal;
            }
            Move::Play { col, row } => (col, row),
        };

        if !self.in_bounds(col, row) {
            return Legality::NotPlayable;
        }
        let pt = to_index(col, row);

        if pt == self.ko {
            return Legality::KoViolation;
        }
        if !self.on_board.get(pt) || self.black_stones.get(pt) || self.white_stones.get(pt) {
            return Legality::NotPlayable;
        }

        // The stone must be in place for liberty counting; it is reported to
        // the renderer only once the move is known to be legal.
        self.stones_mut(color).set(pt);
        scratch.reset();

        let opp = color.opposite();
        let mut captured_total = 0usize;
        let mut captured_at = PASS_MOVE;

        for n in neighbors(pt) {
            if !self.stones(opp).get(n) || scratch.is_visited(n) {
                continue;
            }
            let group = scratch.explore(
                n,
                self.stones(opp),
                &self.on_board,
                &self.black_stones,
                &self.white_stones,
            );
            if group.has_liberty {
                continue;
            }

            // A capture always commits: suicide is only possible when
            // nothing was captured, and history room was checked above.
            for &m in group.members {
                self.stones_mut(opp).clear(m);
                let (c, r) = from_index(m);
                renderer.cell_changed(c, r, Occupant::Empty);
            }
            captured_total += group.members.len();
            captured_at = group.members[0];
        }

        if captured_total == 0 {
            // Opponent marks left in `visited` cannot interfere: the own
            // colour flood only follows own stones.
            let group = scratch.explore(
                pt,
                self.stones(color),
                &self.on_board,
                &self.black_stones,
                &self.white_stones,
            );
            if !group.has_liberty {
                self.stones_mut(color).clear(pt);
                return Legality::Suicidal;
            }
        }

        self.ko = if captured_total == 1 {
            captured_at
        } else {
            PASS_MOVE
        };
        self.history.push(MoveRecord { point: pt, color });
        renderer.cell_changed(col, row, color.into());
        Legality::Legal
    }

    /// Report every on-board cell to `renderer`, row by row.
    pub fn redraw<R: Renderer>(&self, mut renderer: R) {
        for row in 0..self.height {
            for col in 0..self.width {
                renderer.cell_changed(col, row, self.occupant_at(to_index(col, row)));
            }
        }
    }

    /// Check the structural invariants of the position.
    pub fn is_consistent(&self) -> bool {
        let margin_clear = (0..DATA_LEN as Point).all(|pt| {
            let col = (pt % EXTENT) as i32 - MARGIN as i32;
            let row = (pt / EXTENT) as i32 - MARGIN as i32;
            let inside =
                col >= 0 && row >= 0 && col < self.width as i32 && row < self.height as i32;
            let marked = self.on_board.get(pt)
                || self.black_stones.get(pt)
                || self.white_stones.get(pt);
            inside || !marked
        });
        let ko_ok = self.ko == PASS_MOVE
            || (self.on_board.get(self.ko)
                && !self.black_stones.get(self.ko)
                && !self.white_stones.get(self.ko));

        margin_clear
            && ko_ok
            && self.black_stones.is_disjoint(&self.white_stones)
            && self.black_stones.is_subset(&self.on_board)
            && self.white_stones.is_subset(&self.on_board)
    }
}

impl fmt::Display for Position {
    /// One line per row: `X` black, `O` white, `.` empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.occupant_at(to_index(col, row)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// Text coordinates
// =============================================================================

/// Parse a GTP vertex (e.g. `D4`, `pass`) for a board of the given size.
///
/// Columns use letters A-T skipping I. Row 1 is the bottom row, which is
/// board row `height - 1`.
pub fn parse_vertex(s: &str, width: u8, height: u8) -> Result<Move, VertexError> {
    if s.eq_ignore_ascii_case("pass") {
        return Ok(Move::Pass);
    }

    let malformed = || VertexError::Malformed(s.to_string());
    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(malformed)?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == 'I' {
        return Err(malformed());
    }
    let number: u32 = chars.as_str().parse().map_err(|_| malformed())?;

    // Skip 'I' column (Go convention to avoid confusion with 'J')
    let mut col = letter as u32 - 'A' as u32;
    if letter > 'I' {
        col -= 1;
    }

    if col >= width as u32 || number == 0 || number > height as u32 {
        return Err(VertexError::OffBoard(s.to_string()));
    }
    Ok(Move::Play {
        col: col as u8,
        row: (height as u32 - number) as u8,
    })
}

/// Format a move as a GTP vertex for a board of the given height.
///
/// `row` must be below `height`; release builds print row 0 for points
/// under the board instead of wrapping.
pub fn format_vertex(mv: Move, height: u8) -> String {
    match mv {
        Move::Pass => "pass".into(),
        Move::Play { col, row } => {
            debug_assert!(row < height, "row {row} outside a board of height {height}");
            format!("{}{}", column_letter(col), height.saturating_sub(row))
        }
    }
}

/// GTP column letters, A-Z without I.
const COLUMN_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// GTP column letter for board column `col` (A-T, no I). `?` past `Z`.
pub fn column_letter(col: u8) -> char {
    debug_assert!(col < MAX_SIZE, "column {col} outside the largest board");
    COLUMN_LETTERS.get(col as usize).map_or('?', |&b| b as char)
}
