//! Tick-driven game session.
//!
//! The host samples its input once per tick and hands at most one action to
//! [`Session::tick`]. The session owns the position and the flood-fill
//! scratch buffers, so nothing is allocated while a game is in progress.

use tracing::{debug, info, trace};

use crate::error::{ConfigError, ReplayError};
use crate::group::Scratch;
use crate::position::{Color, GameConfig, Legality, Move, Position};
use crate::render::Renderer;

/// A move attempt sampled from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub mv: Move,
    pub color: Color,
}

/// One game in progress.
#[derive(Debug, Clone, Default)]
pub struct Session {
    position: Position,
    scratch: Scratch,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Session {
            position: Position::new(config)?,
            scratch: Scratch::new(),
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Start a new game and redraw the whole board.
    pub fn new_game<R: Renderer>(
        &mut self,
        config: GameConfig,
        renderer: R,
    ) -> Result<(), ConfigError> {
        self.position.reset(config)?;
        info!(
            width = config.width,
            height = config.height,
            komi2 = config.komi2,
            "new game"
        );
        self.position.redraw(renderer);
        Ok(())
    }

    pub fn set_komi2(&mut self, komi2: i8) {
        self.position.set_komi2(komi2);
        debug!(komi2, "komi changed");
    }

    /// Action for the side to move.
    pub fn action(&self, mv: Move) -> Action {
        Action {
            mv,
            color: self.position.color_to_play(),
        }
    }

    /// Process one tick's input. Returns `None` when there was no action.
    pub fn tick<R: Renderer>(&mut self, sample: Option<Action>, renderer: R) -> Option<Legality> {
        let Action { mv, color } = sample?;
        let result = self
            .position
            .play_move(mv, color, &mut self.scratch, renderer);

        if result.is_legal() {
            debug!(
                move_number = self.position.move_count(),
                color = %color,
                mv = ?mv,
                "move played"
            );
            trace!("\n{}", self.position);
        } else {
            debug!(color = %color, mv = ?mv, reason = %result, "move rejected");
        }
        Some(result)
    }

    /// Ghost-stone preview: the colour to show at `(col, row)`, if any.
    pub fn preview(&self, col: u8, row: u8) -> Option<Color> {
        self.position
            .can_play_approx(col, row)
            .then(|| self.position.color_to_play())
    }

    /// Take back the last move by replaying the history without it.
    ///
    /// Returns false when there is nothing to undo. The whole board is
    /// redrawn afterwards.
    pub fn undo<R: Renderer>(&mut self, renderer: R) -> Result<bool, ReplayError> {
        let records = self.position.history().as_slice();
        let Some((_, earlier)) = records.split_last() else {
            return Ok(false);
        };
        let position = Position::replay(self.position.config(), earlier)?;
        self.position = position;
        debug!(move_count = self.position.move_count(), "move undone");
        self.position.redraw(renderer);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Change, Occupant};

    fn session_5x5() -> Session {
        Session::new(GameConfig::new(5, 5, 0)).unwrap()
    }

    #[test]
    fn test_tick_without_action() {
        let mut session = session_5x5();
        assert_eq!(session.tick(None, ()), None);
        assert_eq!(session.position().move_count(), 0);
    }

    #[test]
    fn test_tick_alternates_colors() {
        let mut session = session_5x5();
        let a = session.action(Move::Play { col: 0, row: 0 });
        assert_eq!(a.color, Color::Black);
        assert_eq!(session.tick(Some(a), ()), Some(Legality::Legal));

        let b = session.action(Move::Play { col: 1, row: 0 });
        assert_eq!(b.color, Color::White);
        assert_eq!(session.tick(Some(b), ()), Some(Legality::Legal));
        assert_eq!(session.position().occupant(1, 0), Some(Occupant::White));
    }

    #[test]
    fn test_rejected_move_emits_nothing() {
        let mut session = session_5x5();
        let a = session.action(Move::Play { col: 2, row: 2 });
        session.tick(Some(a), ());

        let mut changes: Vec<Change> = Vec::new();
        let again = session.action(Move::Play { col: 2, row: 2 });
        assert_eq!(
            session.tick(Some(again), &mut changes),
            Some(Legality::NotPlayable)
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn test_preview() {
        let mut session = session_5x5();
        assert_eq!(session.preview(0, 0), Some(Color::Black));
        let a = session.action(Move::Play { col: 0, row: 0 });
        session.tick(Some(a), ());
        assert_eq!(session.preview(0, 0), None);
        assert_eq!(session.preview(1, 1), Some(Color::White));
        assert_eq!(session.preview(9, 9), None);
    }

    #[test]
    fn test_new_game_redraws_every_cell() {
        let mut session = session_5x5();
        let mut changes: Vec<Change> = Vec::new();
        session
            .new_game(GameConfig::new(7, 6, 13), &mut changes)
            .unwrap();
        assert_eq!(changes.len(), 42);
        assert!(changes.iter().all(|c| c.occupant == Occupant::Empty));
        assert_eq!(session.position().komi2(), 13);
    }

    #[test]
    fn test_set_komi_keeps_game() {
        let mut session = session_5x5();
        let a = session.action(Move::Play { col: 2, row: 2 });
        session.tick(Some(a), ());

        session.set_komi2(15);
        assert_eq!(session.position().komi2(), 15);
        assert_eq!(session.position().move_count(), 1);
        assert_eq!(session.position().occupant(2, 2), Some(Occupant::Black));
        assert_eq!(session.undo(()), Ok(true));
        assert_eq!(session.position().komi2(), 15);
    }

    #[test]
    fn test_undo() {
        let mut session = session_5x5();
        assert_eq!(session.undo(()), Ok(false));

        for mv in [
            Move::Play { col: 1, row: 1 },
            Move::Play { col: 3, row: 3 },
        ] {
            let a = session.action(mv);
            session.tick(Some(a), ());
        }
        let mut changes: Vec<Change> = Vec::new();
        assert_eq!(session.undo(&mut changes), Ok(true));
        assert_eq!(session.position().move_count(), 1);
        assert_eq!(session.position().occupant(3, 3), Some(Occupant::Empty));
        assert_eq!(session.position().occupant(1, 1), Some(Occupant::Black));
        assert_eq!(session.position().color_to_play(), Color::White);
        assert_eq!(changes.len(), 25);
    }
}
