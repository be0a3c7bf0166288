//! Group flood fill and liberty detection.
//!
//! A single [`Scratch`] is owned by the caller and reused for every move, so
//! exploring groups never allocates. The visited set is cleared once per
//! move; successive explorations within the same move share it, which lets
//! the capture scan skip groups already reached from another direction.

use arrayvec::ArrayVec;

use crate::bitfield::Bitfield;
use crate::constants::{DELTA, MAX_POINTS};
use crate::position::Point;

/// Result of exploring one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group<'a> {
    /// Every stone of the group, in visiting order. `members[0]` is the seed.
    pub members: &'a [Point],
    /// Whether at least one member touches an empty on-board point.
    pub has_liberty: bool,
}

/// Reusable BFS queue and visited set.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    queue: ArrayVec<Point, MAX_POINTS>,
    visited: Bitfield,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all visited marks. Call once at the start of each move.
    pub fn reset(&mut self) {
        self.visited.clear_all();
        self.queue.clear();
    }

    pub fn is_visited(&self, pt: Point) -> bool {
        self.visited.get(pt)
    }

    /// Breadth-first traversal of the group containing `seed`, following
    /// `stones`. Every reachable stone is visited exactly once; the search
    /// does not stop at the first liberty because the caller may need the
    /// complete member list to remove the group.
    ///
    /// A neighbour is a liberty when it lies on the board, is unvisited and
    /// holds no stone of either colour.
    ///
    /// `seed` must not be visited yet.
    pub fn explore(
        &mut self,
        seed: Point,
        stones: &Bitfield,
        on_board: &Bitfield,
        black: &Bitfield,
        white: &Bitfield,
    ) -> Group<'_> {
        debug_assert!(!self.visited.get(seed), "seed already visited");

        self.queue.clear();
        self.queue.push(seed);
        self.visited.set(seed);

        let mut has_liberty = false;
        let mut head = 0;
        while head < self.queue.len() {
            let pt = self.queue[head];
            head += 1;

            for n in neighbors(pt) {
                if self.visited.get(n) {
                    continue;
                }
                if stones.get(n) {
                    self.visited.set(n);
                    self.queue.push(n);
                    continue;
                }
                if !has_liberty && on_board.get(n) && !black.get(n) && !white.get(n) {
                    has_liberty = true;
                }
            }
        }

        Group {
            members: &self.queue,
            has_liberty,
        }
    }
}

/// The four orthogonal neighbours (Up, Down, Left, Right) of a point.
///
/// Only meaningful for on-board points, whose neighbours always stay inside
/// the padded grid.
#[inline]
pub fn neighbors(pt: Point) -> [Point; 4] {
    std::array::from_fn(|i| pt.wrapping_add_signed(DELTA[i]))
}
