//! Tile-Go: a Go rule engine for constrained, tick-driven hosts.
//!
//! The engine keeps the whole game in fixed-size storage: three bit fields
//! over a padded grid, a bounded move history and a reusable flood-fill
//! scratch buffer. Playing a move never allocates.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and storage sizes
//! - [`bitfield`] - Fixed-capacity bit set over the padded grid
//! - [`group`] - Group flood fill and liberty detection
//! - [`position`] - Board state, legality, captures and ko
//! - [`history`] - Append-only move log and turn derivation
//! - [`render`] - Change notifications for the renderer
//! - [`session`] - Tick-driven game loop
//! - [`playout`] - Random games for demos and soak testing
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use tile_go::group::Scratch;
//! use tile_go::position::{Color, GameConfig, Legality, Move, Position};
//!
//! let mut pos = Position::new(GameConfig::new(9, 9, 13)).unwrap();
//! let mut scratch = Scratch::new();
//!
//! let result = pos.play_move(Move::Play { col: 4, row: 4 }, Color::Black, &mut scratch, ());
//! assert_eq!(result, Legality::Legal);
//! assert_eq!(pos.color_to_play(), Color::White);
//! ```

pub mod bitfield;
pub mod constants;
pub mod error;
pub mod group;
pub mod gtp;
pub mod history;
pub mod playout;
pub mod position;
pub mod render;
pub mod session;

pub use error::{ConfigError, ReplayError, VertexError};
pub use group::Scratch;
pub use history::{History, MoveRecord};
pub use position::{Color, GameConfig, Legality, Move, Point, Position};
pub use render::{Change, Occupant, Renderer};
pub use session::{Action, Session};
