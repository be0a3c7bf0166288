//! Board geometry and storage constants.
//!
//! The board is stored in a padded grid: a one-cell margin surrounds the
//! largest supported board so that stepping to any of the four neighbours of
//! an on-board point never leaves the allocated storage. Smaller boards use
//! the top-left corner of the same grid.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported board side.
pub const MIN_SIZE: u8 = 5;

/// Largest supported board side.
pub const MAX_SIZE: u8 = 19;

/// Width of the sentinel margin on each side of the board.
pub const MARGIN: u16 = 1;

/// Side of the padded grid (board plus margin on both sides).
pub const EXTENT: u16 = MAX_SIZE as u16 + 2 * MARGIN;

/// Number of coordinates in the padded grid.
pub const DATA_LEN: usize = EXTENT as usize * EXTENT as usize;

/// Bytes needed to hold one bit per padded-grid coordinate.
pub const FIELD_BYTES: usize = DATA_LEN.div_ceil(8);

/// Number of playable points on the largest board.
pub const MAX_POINTS: usize = MAX_SIZE as usize * MAX_SIZE as usize;

// =============================================================================
// Move History
// =============================================================================

/// Capacity of the move history, passes included.
pub const HISTORY_MAX: usize = 512;

/// Pass marker. Lies outside the padded grid, so it never names a real point.
pub const PASS_MOVE: u16 = 0x7FFF;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Offsets to the four orthogonal neighbours in the padded grid.
/// Order: Up, Down, Left, Right. Capture and flood-fill order depend on it.
pub const DELTA: [i16; 4] = [
    -(EXTENT as i16), // Up (previous row)
    EXTENT as i16,    // Down (next row)
    -1,               // Left
    1,                // Right
];

const _: () = assert!((PASS_MOVE as usize) >= DATA_LEN);
