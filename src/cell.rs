use core::fmt;

/// A grid coordinate. Rows grow downwards (south), columns grow to the right (east).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    /// The cell one step in `direction`, or [None] if that would leave the
    /// `rows` x `cols` rectangle.
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Cell> {
        let (d_row, d_col) = direction.offset();
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < rows && col < cols).then_some(Cell { row, col })
    }

    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Cell {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four cardinal moves on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// `(row, col)` delta of a single move.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// The direction leading from `from` to the orthogonally adjacent `to`.
    pub fn between(from: &Cell, to: &Cell) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| {
            let (d_row, d_col) = d.offset();
            from.row.checked_add_signed(d_row) == Some(to.row)
                && from.col.checked_add_signed(d_col) == Some(to.col)
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution_without_fixed_points() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn step_stays_inside_the_rectangle() {
        let corner = Cell::new(0, 0);
        assert_eq!(corner.step(Direction::North, 3, 3), None);
        assert_eq!(corner.step(Direction::West, 3, 3), None);
        assert_eq!(corner.step(Direction::East, 3, 3), Some(Cell::new(0, 1)));
        assert_eq!(corner.step(Direction::South, 3, 3), Some(Cell::new(1, 0)));
        let far = Cell::new(2, 2);
        assert_eq!(far.step(Direction::South, 3, 3), None);
        assert_eq!(far.step(Direction::East, 3, 3), None);
    }

    #[test]
    fn between_adjacent_cells() {
        let c = Cell::new(1, 1);
        for d in Direction::ALL {
            let n = c.step(d, 3, 3).unwrap();
            assert_eq!(Direction::between(&c, &n), Some(d));
        }
        assert_eq!(Direction::between(&c, &Cell::new(2, 2)), None);
        assert_eq!(Direction::between(&c, &c), None);
    }
}
