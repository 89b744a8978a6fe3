//! Fuzzes the search by comparing it on many random weight grids against an exhaustive
//! relaxation over the same state graph, and by checking every returned route against the
//! movement policy it was searched with.

use std::collections::HashMap;

use itertools::Itertools;
use rand::prelude::*;
use streak_pathfinding::*;

fn random_map(rng: &mut StdRng, max_side: usize, max_weight: u32) -> CostMap {
    let rows = rng.gen_range(1..=max_side);
    let cols = rng.gen_range(1..=max_side);
    let weights = (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(0..=max_weight)).collect::<Vec<u32>>())
        .collect::<Vec<_>>();
    CostMap::from_rows(weights).unwrap()
}

fn random_cell(map: &CostMap, rng: &mut StdRng) -> Cell {
    Cell::new(rng.gen_range(0..map.rows()), rng.gen_range(0..map.cols()))
}

/// Bellman-Ford style relaxation until nothing improves.
fn reference_cost(map: &CostMap, policy: &MovementPolicy, start: Cell, goal: Cell) -> Option<Cost> {
    let mut best: HashMap<SearchState, Cost> = HashMap::new();
    best.insert(SearchState::start(start), 0);
    let mut changed = true;
    while changed {
        changed = false;
        let snapshot = best.iter().map(|(s, c)| (*s, *c)).collect::<Vec<_>>();
        for (state, cost) in snapshot {
            for d in policy.allowed_directions(state.last, state.streak) {
                let Some(cell) = map.neighbor(&state.cell, d) else {
                    continue;
                };
                let streak = if state.last == Some(d) { state.streak + 1 } else { 1 };
                let next = SearchState {
                    cell,
                    last: Some(d),
                    streak,
                };
                let candidate = cost + map.weight_at(&cell).unwrap();
                let entry = best.entry(next).or_insert(Cost::MAX);
                if candidate < *entry {
                    *entry = candidate;
                    changed = true;
                }
            }
        }
    }
    best.iter()
        .filter(|(s, _)| s.cell == goal && policy.can_stop(s.last, s.streak))
        .map(|(_, c)| *c)
        .min()
}

fn check_route(map: &CostMap, policy: &MovementPolicy, start: Cell, goal: Cell, route: &Route) {
    assert_eq!(route.cells.first(), Some(&start));
    assert_eq!(route.cells.last(), Some(&goal));
    assert_eq!(path_cost(map, &route.cells).unwrap(), route.cost);
    assert!(policy.admits(&route.cells), "{:?} violates {:?}", route.cells, policy);
    let moves = path_moves(&route.cells).unwrap();
    assert!(moves.iter().tuple_windows().all(|(a, b)| *a != b.opposite()));
    for (_, len) in route.runs() {
        assert!(len as u32 <= policy.max_streak());
        assert!(len as u32 >= policy.min_streak_before_turn());
    }
    assert!(route.goal_state.streak <= policy.max_streak());
}

#[test]
fn fuzz_against_reference() {
    const N_GRIDS: usize = 150;
    let mut rng = StdRng::seed_from_u64(0);
    let policies = [
        MovementPolicy::short_run(),
        MovementPolicy::long_run(),
        MovementPolicy::new(0, 1).unwrap(),
        MovementPolicy::new(2, 3).unwrap(),
    ];
    for policy in policies {
        for _ in 0..N_GRIDS {
            let map = random_map(&mut rng, 6, 9);
            let start = random_cell(&map, &mut rng);
            let goal = random_cell(&map, &mut rng);
            let search = PathSearch::new(&map, policy);
            let expected = reference_cost(&map, &policy, start, goal);
            match search.shortest_path(start, goal) {
                Ok(route) => {
                    if Some(route.cost) != expected {
                        print!("{map}");
                    }
                    assert_eq!(Some(route.cost), expected);
                    check_route(&map, &policy, start, goal, &route);
                    assert_eq!(search.minimum_cost(start, goal), Ok(route.cost));
                }
                Err(Error::NoPathFound { .. }) => assert_eq!(expected, None),
                Err(e) => panic!("unexpected error {e}"),
            }
        }
    }
}

#[test]
fn fuzz_zero_weights() {
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(1);
    for policy in [MovementPolicy::short_run(), MovementPolicy::long_run()] {
        for _ in 0..N_GRIDS {
            let map = random_map(&mut rng, 12, 0);
            let start = random_cell(&map, &mut rng);
            let goal = random_cell(&map, &mut rng);
            if let Ok(cost) = PathSearch::new(&map, policy).minimum_cost(start, goal) {
                assert_eq!(cost, 0);
            }
        }
    }
}

#[test]
fn fuzz_settlement_order() {
    const N_GRIDS: usize = 100;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_GRIDS {
        let map = random_map(&mut rng, 10, 9);
        let search = PathSearch::new(&map, MovementPolicy::long_run());
        let mut previous: Cost = 0;
        let mut seen = std::collections::HashSet::new();
        let result = search.shortest_path_observed(map.top_left(), map.bottom_right(), |s, c| {
            assert!(c >= previous);
            assert!(seen.insert(*s), "{s:?} settled twice");
            assert!(s.streak <= 10);
            previous = c;
        });
        if let Ok(route) = result {
            assert_eq!(route.stats.settled, seen.len());
            assert!(route.goal_state.streak >= 4);
        }
    }
}
