use smallvec::SmallVec;

use crate::cell::{Cell, Direction};
use crate::error::{Error, Result};
use crate::path::path_moves;

/// Decides which moves are legal given the direction of the previous move and the length of
/// the straight run that ended with it. The search only ever talks to its policy through this
/// trait.
pub trait MovementRule {
    /// Directions that may be taken next. `last` is [None] only at the start state.
    fn allowed_directions(&self, last: Option<Direction>, streak: u32) -> SmallVec<[Direction; 4]>;

    /// Whether a search may end in a state reached by a run of length `streak`.
    fn can_stop(&self, last: Option<Direction>, streak: u32) -> bool;

    /// Upper bound on the run length of any state the search generates.
    fn max_streak(&self) -> u32;

    /// Replays the moves of `path` through the rule and checks that every move is allowed
    /// and that the path ends in a state where stopping is permitted.
    fn admits(&self, path: &[Cell]) -> bool {
        let Some(moves) = path_moves(path) else {
            return false;
        };
        let mut last = None;
        let mut streak = 0;
        for direction in moves {
            if !self.allowed_directions(last, streak).contains(&direction) {
                return false;
            }
            streak = if last == Some(direction) { streak + 1 } else { 1 };
            last = Some(direction);
        }
        self.can_stop(last, streak)
    }
}

/// [MovementPolicy] forbids reversing, caps straight runs at `max_streak` moves and, once a run
/// has started, forbids turning (or stopping) until it is at least `min_streak_before_turn` long.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MovementPolicy {
    min_streak_before_turn: u32,
    max_streak: u32,
}

impl MovementPolicy {
    pub fn new(min_streak_before_turn: u32, max_streak: u32) -> Result<MovementPolicy> {
        if max_streak == 0 || min_streak_before_turn > max_streak {
            return Err(Error::InvalidPolicyParameters {
                min_streak_before_turn,
                max_streak,
            });
        }
        Ok(MovementPolicy {
            min_streak_before_turn,
            max_streak,
        })
    }

    /// At most three moves in a row, turns allowed at any time.
    pub const fn short_run() -> MovementPolicy {
        MovementPolicy {
            min_streak_before_turn: 0,
            max_streak: 3,
        }
    }

    /// Runs of four to ten moves.
    pub const fn long_run() -> MovementPolicy {
        MovementPolicy {
            min_streak_before_turn: 4,
            max_streak: 10,
        }
    }

    pub fn min_streak_before_turn(&self) -> u32 {
        self.min_streak_before_turn
    }
}

impl Default for MovementPolicy {
    fn default() -> MovementPolicy {
        MovementPolicy::short_run()
    }
}

impl MovementRule for MovementPolicy {
    fn allowed_directions(&self, last: Option<Direction>, streak: u32) -> SmallVec<[Direction; 4]> {
        let Some(last) = last else {
            return SmallVec::from(Direction::ALL);
        };
        if streak < self.min_streak_before_turn {
            // min <= max, so continuing is still within the cap
            return SmallVec::from_slice(&[last]);
        }
        Direction::ALL
            .into_iter()
            .filter(|&d| d != last.opposite())
            .filter(|&d| d != last || streak < self.max_streak)
            .collect()
    }

    fn can_stop(&self, _last: Option<Direction>, streak: u32) -> bool {
        streak >= self.min_streak_before_turn
    }

    fn max_streak(&self) -> u32 {
        self.max_streak
    }
}
