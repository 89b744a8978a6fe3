use core::fmt;
use std::str::FromStr;

use itertools::Itertools;
use num_traits::ToPrimitive;

use crate::cell::{Cell, Direction};
use crate::error::{Error, Result};
use crate::Cost;

/// [CostMap] is an immutable rectangular grid of non-negative traversal costs. Entering a cell
/// costs its weight; leaving the start cell is free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMap {
    rows: usize,
    cols: usize,
    weights: Vec<Cost>,
}

impl CostMap {
    /// Builds a map from rows of equal, non-zero length. Fails with [Error::InvalidGrid] on empty
    /// or jagged input and on entries that are negative, fractional or do not fit in [Cost].
    pub fn from_rows<R, T>(rows: R) -> Result<CostMap>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = T>,
        T: ToPrimitive,
    {
        let mut weights = Vec::new();
        let mut widths = Vec::new();
        for (row, values) in rows.into_iter().enumerate() {
            let before = weights.len();
            for (col, value) in values.into_iter().enumerate() {
                let integral = value.to_f64().is_some_and(|v| v.fract() == 0.0);
                let weight = value.to_u64().filter(|_| integral).ok_or_else(|| {
                    Error::InvalidGrid(format!(
                        "entry at ({row}, {col}) is not a non-negative integer"
                    ))
                })?;
                weights.push(weight);
            }
            widths.push(weights.len() - before);
        }
        if widths.is_empty() {
            return Err(Error::InvalidGrid("grid has no rows".to_owned()));
        }
        if !widths.iter().all_equal() {
            let (row, width) = widths
                .iter()
                .enumerate()
                .find(|(_, w)| **w != widths[0])
                .map(|(row, w)| (row, *w))
                .unwrap_or_default();
            return Err(Error::InvalidGrid(format!(
                "row {row} has {width} entries, expected {}",
                widths[0]
            )));
        }
        if widths[0] == 0 {
            return Err(Error::InvalidGrid("grid rows are empty".to_owned()));
        }
        Ok(CostMap {
            rows: widths.len(),
            cols: widths[0],
            weights,
        })
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Checks that `cell` lies on the grid.
    pub fn check_bounds(&self, cell: &Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                cell: *cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn weight_at(&self, cell: &Cell) -> Result<Cost> {
        self.check_bounds(cell)?;
        Ok(self.weights[cell.row * self.cols + cell.col])
    }

    /// The adjacent cell in `direction`, [None] at the border.
    pub fn neighbor(&self, cell: &Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction, self.rows, self.cols)
    }

    pub fn top_left(&self) -> Cell {
        Cell::new(0, 0)
    }
    pub fn bottom_right(&self) -> Cell {
        Cell::new(self.rows - 1, self.cols - 1)
    }

    /// Largest weight on the map.
    pub fn max_weight(&self) -> Cost {
        self.weights.iter().copied().max().unwrap_or_default()
    }
}

/// Parses lines of decimal digits, one cell per character. A line containing whitespace is read
/// as whitespace separated numbers instead, which is how [Display] prints maps with weights above
/// nine. Blank leading and trailing lines are ignored and both `\n` and `\r\n` line endings are
/// accepted.
impl FromStr for CostMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<CostMap> {
        let rows = s
            .trim()
            .lines()
            .enumerate()
            .map(|(row, line)| {
                let line = line.trim();
                if line.contains(char::is_whitespace) {
                    line.split_whitespace()
                        .enumerate()
                        .map(|(col, token)| {
                            token.parse::<Cost>().map_err(|_| {
                                Error::InvalidGrid(format!("unexpected {token:?} at ({row}, {col})"))
                            })
                        })
                        .collect::<Result<Vec<Cost>>>()
                } else {
                    line.chars()
                        .enumerate()
                        .map(|(col, c)| {
                            c.to_digit(10).map(Cost::from).ok_or_else(|| {
                                Error::InvalidGrid(format!("unexpected {c:?} at ({row}, {col})"))
                            })
                        })
                        .collect::<Result<Vec<Cost>>>()
                }
            })
            .collect::<Result<Vec<_>>>()?;
        CostMap::from_rows(rows)
    }
}

/// Prints one line per row, as bare digits when every weight is below ten and as space
/// separated numbers otherwise, so the output always parses back into the same map.
impl fmt::Display for CostMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let separator = if self.max_weight() > 9 { " " } else { "" };
        for row in self.weights.chunks(self.cols) {
            writeln!(f, "{}", row.iter().join(separator))?;
        }
        Ok(())
    }
}
