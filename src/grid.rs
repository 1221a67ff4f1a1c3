use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        euclidean_distance(*self, *other)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from(v: (usize, usize)) -> Self {
        Coordinate { x: v.0, y: v.1 }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }

    /// Every cell in row-major order: y outer, x inner.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        iproduct!(0..self.rows, 0..self.cols).map(|(y, x)| Coordinate::new(x, y))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(12, 12)
    }
}

pub fn euclidean_distance(a: Coordinate, b: Coordinate) -> f64 {
    let dx = b.x as f64 - a.x as f64;
    let dy = b.y as f64 - a.y as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Sum of distances from `cell` to every point in `targets`
pub fn total_distance<'a, I>(cell: Coordinate, targets: I) -> f64
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    targets
        .into_iter()
        .map(|t| euclidean_distance(cell, *t))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(euclidean_distance((0, 0).into(), (3, 4).into()), 5.0);
        assert_eq!(euclidean_distance((3, 4).into(), (0, 0).into()), 5.0);
        assert_eq!(euclidean_distance((7, 7).into(), (7, 7).into()), 0.0);
    }

    #[test]
    fn cells_are_row_major() {
        let grid = Grid::new(3, 2);
        let cells: Vec<(usize, usize)> = grid.cells().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            cells,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn contains_checks_both_axes() {
        let grid = Grid::default();
        assert!(grid.contains(Coordinate::new(11, 11)));
        assert!(!grid.contains(Coordinate::new(12, 0)));
        assert!(!grid.contains(Coordinate::new(0, 12)));
    }

    #[test]
    fn total_distance_sums_every_target() {
        let targets = [Coordinate::new(0, 0), Coordinate::new(0, 2)];
        assert!((total_distance(Coordinate::new(0, 1), &targets) - 2.0).abs() < 1e-12);
        assert_eq!(total_distance(Coordinate::new(0, 1), &[]), 0.0);
    }
}
