//! # streak_pathfinding
//!
//! Minimum-cost pathfinding on a grid of non-negative integer weights where the legal moves
//! depend on how the current cell was reached. A [MovementPolicy] forbids reversing, caps the
//! length of straight runs and can require a minimum run length before turning or stopping.
//! The search is [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! over states made of a cell, the last direction moved and the current run length, driven by
//! a binary [PriorityQueue] with lazy deletion of outdated entries.
//!
//! ```
//! use streak_pathfinding::{CostMap, MovementPolicy, PathSearch};
//!
//! let map: CostMap = "11111\n11111\n11111\n11111\n11111".parse().unwrap();
//! let search = PathSearch::new(&map, MovementPolicy::short_run());
//! let route = search.shortest_path(map.top_left(), map.bottom_right()).unwrap();
//! assert_eq!(route.cost, 8);
//! assert!(route.runs().iter().all(|&(_, len)| len <= 3));
//! ```
pub mod cell;
pub mod cost_map;
pub mod error;
pub mod path;
pub mod policy;
pub mod queue;
pub mod search;

pub use cell::{Cell, Direction};
pub use cost_map::CostMap;
pub use error::{Error, Result};
pub use path::{path_cost, path_moves, path_runs};
pub use policy::{MovementPolicy, MovementRule};
pub use queue::PriorityQueue;
pub use search::{PathSearch, Route, SearchState, SearchStats};

/// Weights and accumulated path costs.
pub type Cost = u64;
