//! Random games.
//!
//! Plays uniformly random legal moves until both sides pass or the history
//! fills up. There is no evaluation here: the playouts drive the demo and
//! exercise the move engine over long, capture-heavy games.
//!
//! A side never fills its own single-point eyes, otherwise random games
//! would not terminate before the history limit.

use arrayvec::ArrayVec;

use crate::constants::MAX_POINTS;
use crate::group::{Scratch, neighbors};
use crate::position::{Color, Legality, Move, Position, from_index, to_index};
use crate::render::{Occupant, Renderer};

/// How a playout ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayoutEnd {
    /// Two passes in a row
    Passes,
    /// The history has no room for another move
    HistoryFull,
    /// The caller's move limit was reached
    MoveLimit,
}

/// Check if `(col, row)` is an empty point whose on-board neighbours are all
/// stones of `color`. May be a false eye.
pub fn is_eyeish(pos: &Position, col: u8, row: u8, color: Color) -> bool {
    if pos.occupant(col, row) != Some(Occupant::Empty) {
        return false;
    }
    let stones = pos.stones(color);
    neighbors(to_index(col, row))
        .into_iter()
        .filter(|&n| pos.on_board().get(n))
        .all(|n| stones.get(n))
}

/// Play one random legal move for the side to move, passing if none exists.
///
/// Rejected attempts leave the position untouched, so candidates are tried
/// directly on `pos` until one is accepted.
pub fn play_random_move<R: Renderer>(
    pos: &mut Position,
    rng: &mut fastrand::Rng,
    scratch: &mut Scratch,
    mut renderer: R,
) -> (Move, Legality) {
    let color = pos.color_to_play();

    let mut candidates: ArrayVec<(u8, u8), MAX_POINTS> = ArrayVec::new();
    for row in 0..pos.height() {
        for col in 0..pos.width() {
            if pos.can_play_approx(col, row) && !is_eyeish(pos, col, row, color) {
                candidates.push((col, row));
            }
        }
    }

    // Partial Fisher-Yates: draw candidates until one is legal.
    let n = candidates.len();
    for i in 0..n {
        let j = rng.usize(i..n);
        candidates.swap(i, j);

        let (col, row) = candidates[i];
        let mv = Move::Play { col, row };
        match pos.play_move(mv, color, scratch, &mut renderer) {
            Legality::Legal => return (mv, Legality::Legal),
            Legality::HistoryFull => return (mv, Legality::HistoryFull),
            _ => {}
        }
    }

    let result = pos.play_move(Move::Pass, color, scratch, &mut renderer);
    (Move::Pass, result)
}

/// Play random moves until the game ends or `max_moves` moves were added.
pub fn random_game(
    pos: &mut Position,
    rng: &mut fastrand::Rng,
    max_moves: usize,
) -> PlayoutEnd {
    let mut scratch = Scratch::new();
    let mut played = 0;

    loop {
        if played >= max_moves {
            return PlayoutEnd::MoveLimit;
        }
        let (_, result) = play_random_move(pos, rng, &mut scratch, ());
        if result == Legality::HistoryFull {
            return PlayoutEnd::HistoryFull;
        }
        played += 1;

        let records = pos.history().as_slice();
        if records.len() >= 2 && records[records.len() - 2..].iter().all(|r| r.is_pass()) {
            return PlayoutEnd::Passes;
        }
    }
}

/// Board coordinates of the last non-pass move, if any.
pub fn last_stone(pos: &Position) -> Option<(u8, u8)> {
    pos.history()
        .as_slice()
        .iter()
        .rev()
        .find(|r| !r.is_pass())
        .map(|r| from_index(r.point))
}
