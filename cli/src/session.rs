use chrono::prelude::*;
use sapper_core::{MarkOutcome, Minefield, RevealOutcome, TileId};

/// Engine plus the host-owned clock: it starts with the board and freezes when the game ends.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: Minefield,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub move_count: u32,
}

impl GameSession {
    pub fn new(engine: Minefield, now: DateTime<Utc>) -> Self {
        Self {
            engine,
            started_at: now,
            ended_at: None,
            move_count: 0,
        }
    }

    pub fn restart(&mut self, seed: u64, now: DateTime<Utc>) {
        self.engine.reset(seed);
        self.started_at = now;
        self.ended_at = None;
        self.move_count = 0;
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .clamp(0, u32::MAX.into()) as u32
    }

    pub fn reveal(&mut self, id: TileId, now: DateTime<Utc>) -> RevealOutcome {
        let outcome = self.engine.reveal(id);
        if outcome.has_update() {
            self.on_successful_move(now);
        }
        outcome
    }

    pub fn toggle_flag(&mut self, id: TileId, now: DateTime<Utc>) -> MarkOutcome {
        let outcome = self.engine.toggle_flag(id);
        if outcome.has_update() {
            self.on_successful_move(now);
        }
        outcome
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        self.move_count = self.move_count.saturating_add(1);

        if self.engine.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use sapper_core::{Dimensions, MineLayout};

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(0).unwrap()
    }

    fn secs(n: i64) -> DateTime<Utc> {
        t0() + TimeDelta::seconds(n)
    }

    fn session(width: u8, height: u8, mines: &[TileId]) -> GameSession {
        let layout = MineLayout::from_mine_ids(Dimensions::new(width, height), mines).unwrap();
        GameSession::new(Minefield::with_layout(layout), t0())
    }

    #[test]
    fn clock_runs_from_board_creation() {
        let session = session(3, 3, &[0, 2]);

        assert_eq!(session.move_count, 0);
        assert_eq!(session.elapsed_secs(t0()), 0);
        assert_eq!(session.elapsed_secs(secs(30)), 30);
    }

    #[test]
    fn first_move_does_not_restart_the_clock() {
        let mut session = session(3, 3, &[0, 2]);

        session.reveal(8, secs(5));

        assert_eq!(session.started_at, t0());
        assert_eq!(session.elapsed_secs(secs(12)), 12);
    }

    #[test]
    fn no_op_moves_are_not_counted() {
        let mut session = session(3, 3, &[0]);

        assert_eq!(session.reveal(42, secs(1)), RevealOutcome::NoChange);

        assert_eq!(session.move_count, 0);
        assert_eq!(session.ended_at, None);
    }

    #[test]
    fn clock_freezes_when_game_ends() {
        let mut session = session(3, 3, &[0, 2]);
        session.toggle_flag(0, secs(2));

        assert_eq!(session.reveal(2, secs(9)), RevealOutcome::HitMine);

        assert_eq!(session.elapsed_secs(secs(100)), 9);
        assert_eq!(session.move_count, 2);
    }

    #[test]
    fn restart_resets_clock_and_board() {
        let mut session = session(2, 1, &[0]);
        assert_eq!(session.reveal(1, secs(3)), RevealOutcome::Won);

        session.restart(4, secs(40));

        assert_eq!(session.ended_at, None);
        assert_eq!(session.elapsed_secs(secs(50)), 10);
        assert_eq!(session.move_count, 0);
        assert!(!session.engine.is_finished());
        assert!(!session.engine.mines_placed());
    }
}
