use crate::error::GameError;
use crate::grid::{total_distance, Coordinate, Grid};
use crate::targets::TargetSet;

/// Totals closer than this are treated as equal, so the earlier cell keeps the win
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Best eligible cell and its summed distance to the targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimum {
    pub cell: Coordinate,
    pub total_distance: f64,
}

/// Brute-force scan for the non-target cell with the smallest total distance
/// to every target. Cells are visited row-major and the first one found wins ties.
pub fn find_optimal(grid: Grid, targets: &TargetSet) -> Result<Optimum, GameError> {
    if targets.is_empty() {
        return Err(GameError::NoEligibleCell);
    }

    let mut best: Option<Optimum> = None;

    for cell in grid.cells().filter(|c| !targets.contains(*c)) {
        let total = total_distance(cell, targets);
        if best.map_or(true, |b| total < b.total_distance - TIE_TOLERANCE) {
            best = Some(Optimum {
                cell,
                total_distance: total,
            });
        }
    }

    best.ok_or(GameError::NoEligibleCell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn targets(grid: Grid, cells: &[(usize, usize)]) -> TargetSet {
        TargetSet::from_cells(grid, cells.iter().copied().map(Coordinate::from)).unwrap()
    }

    #[test]
    fn midpoint_between_two_targets() {
        let grid = Grid::default();
        let opt = find_optimal(grid, &targets(grid, &[(0, 0), (0, 2)])).unwrap();
        assert_eq!(opt.cell, Coordinate::new(0, 1));
        assert!((opt.total_distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn never_returns_a_target() {
        let grid = Grid::new(3, 3);
        // the centre would win but it is a target itself
        let set = targets(grid, &[(1, 1), (0, 1), (2, 1)]);
        let opt = find_optimal(grid, &set).unwrap();
        assert!(!set.contains(opt.cell));
        assert_eq!(opt.cell, Coordinate::new(1, 0));
    }

    #[test]
    fn ties_go_to_first_cell_in_scan_order() {
        // (0,1) and (1,1) are both 1 + sqrt(2) away
        let grid = Grid::new(2, 2);
        let opt = find_optimal(grid, &targets(grid, &[(0, 0), (1, 0)])).unwrap();
        assert_eq!(opt.cell, Coordinate::new(0, 1));
    }

    #[test]
    fn diagonal_tie_picks_the_earliest_diagonal_cell() {
        let grid = Grid::default();
        let opt = find_optimal(grid, &targets(grid, &[(0, 0), (11, 11)])).unwrap();
        assert_eq!(opt.cell, Coordinate::new(1, 1));
        assert!((opt.total_distance - 11.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn empty_target_set_has_no_solution() {
        assert_matches!(
            find_optimal(Grid::default(), &TargetSet::default()),
            Err(GameError::NoEligibleCell)
        );
    }

    #[test]
    fn fully_covered_grid_has_no_solution() {
        let grid = Grid::new(2, 1);
        assert_matches!(
            find_optimal(grid, &targets(grid, &[(0, 0), (1, 0)])),
            Err(GameError::NoEligibleCell)
        );
    }
}
