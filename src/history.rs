//! Bounded, append-only move log.
//!
//! The history is the only record of whose turn it is: the side to move is
//! derived from the colour of the last record rather than stored separately.

use arrayvec::ArrayVec;

use crate::constants::{HISTORY_MAX, PASS_MOVE};
use crate::position::{Color, Point};

/// One played move. `point` is [`PASS_MOVE`] for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub point: Point,
    pub color: Color,
}

impl MoveRecord {
    pub fn is_pass(&self) -> bool {
        self.point == PASS_MOVE
    }
}

/// Chronological list of moves, capped at [`HISTORY_MAX`] records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: ArrayVec<MoveRecord, HISTORY_MAX>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Returns false, leaving the log untouched, when full.
    pub(crate) fn push(&mut self, record: MoveRecord) -> bool {
        self.records.try_push(record).is_ok()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.is_full()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn as_slice(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Colour to move next: Black on an empty log, else the opposite of the
    /// last mover.
    pub fn color_to_play(&self) -> Color {
        match self.records.last() {
            Some(record) => record.color.opposite(),
            None => Color::Black,
        }
    }
}
