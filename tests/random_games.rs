//! Randomized games checking the position invariants.
//!
//! Seeds are fixed so failures reproduce.

use tile_go::playout::{PlayoutEnd, play_random_move, random_game};
use tile_go::{Change, Color, GameConfig, Legality, Move, Occupant, Position, Scratch};

const SIZES: [(u8, u8); 4] = [(5, 5), (9, 9), (7, 13), (19, 19)];

/// Renderer-side copy of the board, kept up to date from notifications.
struct Mirror {
    width: u8,
    cells: Vec<Occupant>,
}

impl Mirror {
    fn new(pos: &Position) -> Self {
        let mut changes: Vec<Change> = Vec::new();
        pos.redraw(&mut changes);
        let mut mirror = Mirror {
            width: pos.width(),
            cells: vec![Occupant::Empty; pos.width() as usize * pos.height() as usize],
        };
        mirror.apply(&changes);
        mirror
    }

    fn apply(&mut self, changes: &[Change]) {
        for c in changes {
            self.cells[c.row as usize * self.width as usize + c.col as usize] = c.occupant;
        }
    }

    fn matches(&self, pos: &Position) -> bool {
        (0..pos.height()).all(|row| {
            (0..pos.width()).all(|col| {
                pos.occupant(col, row)
                    == Some(self.cells[row as usize * self.width as usize + col as usize])
            })
        })
    }
}

#[test]
fn test_invariants_hold_through_random_games() {
    for (width, height) in SIZES {
        for seed in 0..8 {
            let mut pos = Position::new(GameConfig::new(width, height, 0)).unwrap();
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut scratch = Scratch::new();
            let mut mirror = Mirror::new(&pos);

            for _ in 0..300 {
                let mut changes: Vec<Change> = Vec::new();
                let (_, result) = play_random_move(&mut pos, &mut rng, &mut scratch, &mut changes);
                assert_eq!(result, Legality::Legal);
                mirror.apply(&changes);

                assert!(pos.is_consistent(), "seed {seed} {width}x{height}\n{pos}");
                assert!(mirror.matches(&pos), "seed {seed} {width}x{height}\n{pos}");
                assert_eq!(pos.move_count(), pos.history().len());
            }
        }
    }
}

#[test]
fn test_rejections_leave_position_unchanged() {
    for (width, height) in SIZES {
        let mut pos = Position::new(GameConfig::new(width, height, 0)).unwrap();
        let mut rng = fastrand::Rng::with_seed(99);
        let mut scratch = Scratch::new();

        for _ in 0..400 {
            // Include coordinates past the board edge.
            let col = rng.u8(0..width + 2);
            let row = rng.u8(0..height + 2);
            let color = if rng.bool() { Color::Black } else { Color::White };

            let before = pos.clone();
            let approx = pos.can_play_approx(col, row);
            let mut changes: Vec<Change> = Vec::new();
            let result = pos.play_move(Move::Play { col, row }, color, &mut scratch, &mut changes);

            if result.is_legal() {
                assert!(approx);
                assert!(!changes.is_empty());
            } else {
                assert_eq!(pos, before, "{result:?} at ({col},{row})");
                assert!(changes.is_empty());
                if result == Legality::Suicidal {
                    assert!(approx);
                }
            }
        }
    }
}

#[test]
fn test_replay_is_deterministic() {
    for (width, height) in SIZES {
        let config = GameConfig::new(width, height, 13);
        let mut pos = Position::new(config).unwrap();
        let mut rng = fastrand::Rng::with_seed(width as u64 * 31 + height as u64);
        random_game(&mut pos, &mut rng, 250);

        let replayed = Position::replay(config, pos.history().as_slice()).unwrap();
        assert_eq!(replayed, pos);
        assert_eq!(replayed.ko(), pos.ko());
    }
}

#[test]
fn test_small_board_game_runs_to_end() {
    let mut pos = Position::new(GameConfig::new(5, 5, 0)).unwrap();
    let mut rng = fastrand::Rng::with_seed(3);
    let end = random_game(&mut pos, &mut rng, usize::MAX);
    assert!(matches!(end, PlayoutEnd::Passes | PlayoutEnd::HistoryFull));
    assert!(pos.is_consistent());
}
