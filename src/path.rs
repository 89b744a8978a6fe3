//! Path reconstruction from the states settled during a search, and helpers to inspect the
//! resulting cell sequences.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::cell::{Cell, Direction};
use crate::cost_map::CostMap;
use crate::error::{Error, Result};
use crate::search::SearchState;
use crate::Cost;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug)]
struct Settled {
    parent: Option<usize>,
    cost: Cost,
}

/// Settled states in settlement order, each with its final cost and the index of the state it
/// was reached from. Indices are stable because entries are never removed.
#[derive(Debug, Default)]
pub(crate) struct SettledStates {
    states: FxIndexMap<SearchState, Settled>,
}

impl SettledStates {
    pub(crate) fn new() -> SettledStates {
        SettledStates::default()
    }

    pub(crate) fn is_settled(&self, state: &SearchState) -> bool {
        self.states.contains_key(state)
    }

    /// Records `state` as final and returns its index. The caller guarantees it was not
    /// settled before.
    pub(crate) fn settle(&mut self, state: SearchState, parent: Option<usize>, cost: Cost) -> usize {
        let (index, previous) = self.states.insert_full(state, Settled { parent, cost });
        debug_assert!(previous.is_none(), "{state:?} settled twice");
        index
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn cost_of(&self, state: &SearchState) -> Option<Cost> {
        self.states.get(state).map(|v| v.cost)
    }

    /// States from the start up to and including the state at `index`.
    fn reconstruct_states(&self, index: usize) -> Vec<SearchState> {
        let mut states: Vec<SearchState> = std::iter::successors(Some(index), |&i| {
            self.states.get_index(i).and_then(|(_, v)| v.parent)
        })
        .filter_map(|i| self.states.get_index(i).map(|(s, _)| *s))
        .collect();
        states.reverse();
        states
    }

    /// Cells from the start up to and including the cell of the state settled at `goal`, an
    /// index returned by [settle](Self::settle). Parents are always settled before their
    /// children, so every link on the way back resolves.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<Cell> {
        self.reconstruct_states(goal)
            .into_iter()
            .map(|s| s.cell)
            .collect()
    }
}

/// Sum of the weights of every cell on `path` except the first. Fails if a cell is off the map
/// or two consecutive cells are not orthogonal neighbours.
pub fn path_cost(map: &CostMap, path: &[Cell]) -> Result<Cost> {
    if let Some(start) = path.first() {
        map.check_bounds(start)?;
    }
    path.iter()
        .tuple_windows()
        .map(|(from, to)| {
            if Direction::between(from, to).is_none() {
                return Err(Error::NotAdjacent {
                    from: *from,
                    to: *to,
                });
            }
            map.weight_at(to)
        })
        .sum()
}

/// Direction of every step of `path`, or [None] if two consecutive cells are not adjacent.
pub fn path_moves(path: &[Cell]) -> Option<Vec<Direction>> {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| Direction::between(a, b))
        .collect()
}

/// Maximal straight runs of `path` as `(direction, number of moves)`.
pub fn path_runs(path: &[Cell]) -> Option<Vec<(Direction, usize)>> {
    let runs = path_moves(path)?
        .into_iter()
        .dedup_with_count()
        .map(|(n, d)| (d, n))
        .collect();
    Some(runs)
}
