use std::env;
use std::fs;

use streak_pathfinding::{CostMap, Error, MovementPolicy, PathSearch};

// Finds the cheapest route from the top left to the bottom right corner of a grid of digits,
// first with runs of at most three moves, then with runs of four to ten moves.
// Pass a file name to use your own grid; set RUST_LOG=debug to see search statistics.
const SAMPLE: &str = "
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let text = match env::args().nth(1) {
        Some(file) => fs::read_to_string(file)?,
        None => SAMPLE.to_owned(),
    };
    let map: CostMap = text.parse()?;
    let (start, goal) = (map.top_left(), map.bottom_right());
    for (name, policy) in [
        ("short runs", MovementPolicy::short_run()),
        ("long runs", MovementPolicy::long_run()),
    ] {
        match PathSearch::new(&map, policy).shortest_path(start, goal) {
            Ok(route) => {
                println!("{name}: cost {} over {} moves", route.cost, route.cells.len() - 1);
                for (direction, len) in route.runs() {
                    println!("  {len} x {direction}");
                }
            }
            Err(Error::NoPathFound { .. }) => println!("{name}: no route"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
