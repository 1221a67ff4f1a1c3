use crate::error::GameError;
use crate::grid::{Coordinate, Grid};
use crate::random::RandomSource;

/// Inclusive bounds on how many targets a round gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRange {
    pub min: usize,
    pub max: usize,
}

impl Default for TargetRange {
    fn default() -> Self {
        Self { min: 3, max: 20 }
    }
}

/// Duplicate-free set of target cells, kept in placement order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetSet {
    cells: Vec<Coordinate>,
}

impl TargetSet {
    /// Build a set from explicit cells, rejecting duplicates and cells off the grid.
    pub fn from_cells<I>(grid: Grid, cells: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut set = TargetSet::default();
        for cell in cells {
            if !grid.contains(cell) {
                return Err(GameError::OutOfBounds(cell));
            }
            if !set.insert(cell) {
                return Err(GameError::DuplicateTarget(cell));
            }
        }
        Ok(set)
    }

    fn insert(&mut self, cell: Coordinate) -> bool {
        if self.contains(cell) {
            return false;
        }
        self.cells.push(cell);
        true
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.cells
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Place a random number of distinct targets on the grid.
///
/// The caller guarantees `range.max < grid.cell_count()`, which
/// `Config::validate` enforces, so rejection sampling always terminates.
pub fn generate<R: RandomSource + ?Sized>(
    grid: Grid,
    range: TargetRange,
    source: &mut R,
) -> TargetSet {
    let count = range.min + source.next_index(range.max - range.min + 1);
    let mut set = TargetSet::default();

    while set.len() < count {
        let x = source.next_index(grid.cols);
        let y = source.next_index(grid.rows);
        set.insert(Coordinate::new(x, y));
    }

    set
}
