//! Boundary to the renderer collaborator.
//!
//! The engine never draws anything. After a committed move it reports each
//! cell whose occupant changed; the renderer owns all display state.

use std::fmt;

use crate::position::Color;

/// What a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Empty,
    Black,
    White,
}

impl From<Color> for Occupant {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Occupant::Black,
            Color::White => Occupant::White,
        }
    }
}

impl Occupant {
    /// Debug-print glyph: `X` black, `O` white, `.` empty.
    pub fn glyph(self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::Black => 'X',
            Occupant::White => 'O',
        }
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// One changed cell in user coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub col: u8,
    pub row: u8,
    pub occupant: Occupant,
}

/// Receiver of cell changes.
pub trait Renderer {
    fn cell_changed(&mut self, col: u8, row: u8, occupant: Occupant);
}

/// Discards every notification.
impl Renderer for () {
    fn cell_changed(&mut self, _col: u8, _row: u8, _occupant: Occupant) {}
}

/// Records notifications in order.
impl Renderer for Vec<Change> {
    fn cell_changed(&mut self, col: u8, row: u8, occupant: Occupant) {
        self.push(Change { col, row, occupant });
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn cell_changed(&mut self, col: u8, row: u8, occupant: Occupant) {
        (**self).cell_changed(col, row, occupant);
    }
}
