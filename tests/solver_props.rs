use pinpoint::grid::total_distance;
use pinpoint::random::RngSource;
use pinpoint::solver::{find_optimal, TIE_TOLERANCE};
use pinpoint::targets::{generate, TargetRange, TargetSet};
use pinpoint::{Coordinate, Grid};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..=12, 1usize..=12).prop_map(|(cols, rows)| Grid::new(cols, rows))
}

/// A grid plus a duplicate-free target list drawn from its cells
fn arb_board() -> impl Strategy<Value = (Grid, TargetSet)> {
    arb_grid().prop_flat_map(|grid| {
        let cells: Vec<Coordinate> = grid.cells().collect();
        let n = cells.len();
        proptest::sample::subsequence(cells, 1..=n).prop_map(move |picked| {
            (grid, TargetSet::from_cells(grid, picked).unwrap())
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Generated sets stay in range, on the board and free of duplicates
    #[test]
    fn generated_targets_are_valid(seed in any::<u64>()) {
        let grid = Grid::default();
        let mut src = RngSource::seeded(seed);
        let set = generate(grid, TargetRange::default(), &mut src);

        prop_assert!((3..=20).contains(&set.len()));
        for (i, a) in set.iter().enumerate() {
            prop_assert!(grid.contains(*a));
            for b in set.iter().skip(i + 1) {
                prop_assert_ne!(a, b);
            }
        }
    }

    /// The solver answer is eligible and nothing eligible beats it
    #[test]
    fn optimum_is_eligible_and_minimal((grid, targets) in arb_board()) {
        match find_optimal(grid, &targets) {
            Ok(opt) => {
                prop_assert!(!targets.contains(opt.cell));
                for cell in grid.cells().filter(|c| !targets.contains(*c)) {
                    let total = total_distance(cell, &targets);
                    prop_assert!(total >= opt.total_distance - TIE_TOLERANCE);
                }
            }
            Err(_) => prop_assert_eq!(targets.len(), grid.cell_count()),
        }
    }

    /// Among cells tied with the optimum, the returned one comes first in row-major order
    #[test]
    fn ties_resolve_to_first_scanned((grid, targets) in arb_board()) {
        if let Ok(opt) = find_optimal(grid, &targets) {
            let first = grid
                .cells()
                .filter(|c| !targets.contains(*c))
                .find(|c| (total_distance(*c, &targets) - opt.total_distance).abs() <= TIE_TOLERANCE)
                .unwrap();
            prop_assert_eq!(first, opt.cell);
        }
    }
}
