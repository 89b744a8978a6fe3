use log::{debug, info};

use crate::cell::{Cell, Direction};
use crate::cost_map::CostMap;
use crate::error::{Error, Result};
use crate::path::{path_runs, SettledStates};
use crate::policy::{MovementPolicy, MovementRule};
use crate::queue::PriorityQueue;
use crate::Cost;

/// A vertex of the search graph: a cell together with the direction of the move that entered it
/// and the number of consecutive moves made in that direction. The same cell reached with a
/// different run is a different vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchState {
    pub cell: Cell,
    pub last: Option<Direction>,
    pub streak: u32,
}

impl SearchState {
    pub fn start(cell: Cell) -> SearchState {
        SearchState {
            cell,
            last: None,
            streak: 0,
        }
    }

    /// The state reached by moving from `self` into `cell` along `direction`.
    fn advance(&self, cell: Cell, direction: Direction) -> SearchState {
        let streak = if self.last == Some(direction) {
            self.streak + 1
        } else {
            1
        };
        SearchState {
            cell,
            last: Some(direction),
            streak,
        }
    }
}

/// Counters collected during a single search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose cost was finalized.
    pub settled: usize,
    /// Frontier entries discarded because their state had already been settled.
    pub stale: usize,
    /// Frontier entries pushed, including the start.
    pub pushed: usize,
    pub peak_frontier: usize,
    /// Candidates dropped because their cost would overflow [Cost].
    pub overflowed: usize,
}

/// A minimum-cost route found by [PathSearch].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub cost: Cost,
    /// Cells from start to goal, both included.
    pub cells: Vec<Cell>,
    pub goal_state: SearchState,
    pub stats: SearchStats,
}

impl Route {
    /// Maximal straight runs along the route.
    pub fn runs(&self) -> Vec<(Direction, usize)> {
        // consecutive cells of a reconstructed route are neighbours, so this is never None
        path_runs(&self.cells).unwrap_or_default()
    }
}

struct FrontierEntry {
    state: SearchState,
    parent: Option<usize>,
}

struct Outcome {
    settled: SettledStates,
    goal_index: usize,
    goal_state: SearchState,
    cost: Cost,
    stats: SearchStats,
}

/// Dijkstra's algorithm over [SearchState]s. Successors come from the [MovementRule]; entering a
/// cell costs its weight in the [CostMap]. Duplicate frontier entries for a state are allowed and
/// dropped when popped after the state has been settled.
#[derive(Clone, Debug)]
pub struct PathSearch<'a, R = MovementPolicy> {
    map: &'a CostMap,
    rule: R,
}

impl<'a, R: MovementRule> PathSearch<'a, R> {
    pub fn new(map: &'a CostMap, rule: R) -> PathSearch<'a, R> {
        PathSearch { map, rule }
    }

    pub fn cost_map(&self) -> &CostMap {
        self.map
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Cost of the cheapest legal route from `start` to `goal`, without building the route.
    pub fn minimum_cost(&self, start: Cell, goal: Cell) -> Result<Cost> {
        self.map.check_bounds(&goal)?;
        self.run(start, |cell| *cell == goal, |_, _| {})?
            .map(|outcome| outcome.cost)
            .ok_or(Error::NoPathFound { start, goal })
    }

    /// Computes the cheapest legal route from `start` to `goal`. The route may only end at
    /// `goal` in a state where the rule permits stopping.
    pub fn shortest_path(&self, start: Cell, goal: Cell) -> Result<Route> {
        self.shortest_path_observed(start, goal, |_, _| {})
    }

    /// Same as [shortest_path](Self::shortest_path), calling `observer` with every state as it
    /// is settled together with its final cost.
    pub fn shortest_path_observed<F>(&self, start: Cell, goal: Cell, observer: F) -> Result<Route>
    where
        F: FnMut(&SearchState, Cost),
    {
        self.map.check_bounds(&goal)?;
        let outcome = self
            .run(start, |cell| *cell == goal, observer)?
            .ok_or(Error::NoPathFound { start, goal })?;
        Ok(self.route(outcome))
    }

    /// Computes the cheapest legal route from `start` to whichever of `goals` is cheapest to
    /// reach. On failure the error names the first goal, or the start if `goals` is empty.
    pub fn shortest_path_to_any(&self, start: Cell, goals: &[Cell]) -> Result<Route> {
        for goal in goals {
            self.map.check_bounds(goal)?;
        }
        let no_path = Error::NoPathFound {
            start,
            goal: goals.first().copied().unwrap_or(start),
        };
        if goals.is_empty() {
            return Err(no_path);
        }
        let outcome = self
            .run(start, |cell| goals.contains(cell), |_, _| {})?
            .ok_or(no_path)?;
        Ok(self.route(outcome))
    }

    fn route(&self, outcome: Outcome) -> Route {
        debug_assert_eq!(outcome.settled.cost_of(&outcome.goal_state), Some(outcome.cost));
        let cells = outcome.settled.reconstruct(outcome.goal_index);
        debug_assert_eq!(cells.last(), Some(&outcome.goal_state.cell));
        Route {
            cost: outcome.cost,
            cells,
            goal_state: outcome.goal_state,
            stats: outcome.stats,
        }
    }

    fn run<FS, FO>(&self, start: Cell, mut success: FS, mut observer: FO) -> Result<Option<Outcome>>
    where
        FS: FnMut(&Cell) -> bool,
        FO: FnMut(&SearchState, Cost),
    {
        self.map.check_bounds(&start)?;
        let (rows, cols) = self.map.dimensions();
        info!("Searching from {} on a {}x{} grid", start, rows, cols);

        let mut frontier = PriorityQueue::with_capacity(rows * cols);
        let mut settled = SettledStates::new();
        let mut stats = SearchStats::default();
        frontier.push(
            0,
            FrontierEntry {
                state: SearchState::start(start),
                parent: None,
            },
        );
        stats.pushed += 1;
        let mut last_cost: Cost = 0;

        while !frontier.is_empty() {
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
            let (cost, FrontierEntry { state, parent }) = frontier.pop()?;
            if settled.is_settled(&state) {
                stats.stale += 1;
                continue;
            }
            debug_assert!(cost >= last_cost, "settled costs must not decrease");
            last_cost = cost;
            let index = settled.settle(state, parent, cost);
            stats.settled += 1;
            observer(&state, cost);

            if success(&state.cell) && self.rule.can_stop(state.last, state.streak) {
                info!("Reached {} at cost {}", state.cell, cost);
                debug!("{:?}", stats);
                return Ok(Some(Outcome {
                    settled,
                    goal_index: index,
                    goal_state: state,
                    cost,
                    stats,
                }));
            }

            for direction in self.rule.allowed_directions(state.last, state.streak) {
                let Some(cell) = self.map.neighbor(&state.cell, direction) else {
                    continue;
                };
                let next = state.advance(cell, direction);
                // Never generate a run longer than the rule's cap, whatever it allowed.
                if next.streak > self.rule.max_streak() || settled.is_settled(&next) {
                    continue;
                }
                let weight = self.map.weight_at(&cell)?;
                // A route whose cost does not fit in Cost can never be the answer.
                let Some(next_cost) = cost.checked_add(weight) else {
                    stats.overflowed += 1;
                    continue;
                };
                frontier.push(
                    next_cost,
                    FrontierEntry {
                        state: next,
                        parent: Some(index),
                    },
                );
                stats.pushed += 1;
            }
        }
        info!("No legal route from {} after settling {} states", start, settled.len());
        debug!("{:?}", stats);
        Ok(None)
    }
}
