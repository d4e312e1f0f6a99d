//! Gap selection for fill-in-the-blank questions
//!
//! Never hides more than half the positions, never hides all of them, and
//! always hides at least one unless there is only a single position.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};
use crate::grid::model::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

/// Grid cells chosen to be hidden
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSet {
    positions: Vec<CellPosition>,
    cell_count: usize,
}

impl GapSet {
    pub fn positions(&self) -> &[CellPosition] {
        &self.positions
    }

    /// Number of cells in the grid the gaps were chosen from
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.positions.contains(&CellPosition { row, col })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellPosition> {
        self.positions.iter()
    }
}

/// How many of `total` positions to hide when `desired` were asked for.
///
/// Returns 0 only when `total <= 1`.
pub fn gap_count(total: usize, desired: usize) -> usize {
    if total <= 1 {
        return 0;
    }
    let max_gaps = (total / 2).max(1);
    desired.min(max_gaps).min(total - 1).max(1)
}

/// Uniformly chosen indices in `0..total`, `gap_count(total, desired)` of them.
///
/// The order of the returned indices is the draw order, so a fixed seed
/// reproduces it exactly.
pub fn select_positions(total: usize, desired: usize, rng: &mut impl Rng) -> Vec<usize> {
    let amount = gap_count(total, desired);
    if amount == 0 {
        return Vec::new();
    }
    index::sample(rng, total, amount).into_vec()
}

/// Choose grid cells to hide.
///
/// A 1×1 grid yields an empty set: the caller should ask for the total.
pub fn select_gaps(grid: &Grid, desired: usize, rng: &mut impl Rng) -> GapSet {
    let cols = grid.num_cols();
    let cell_count = grid.cell_count();

    let positions = select_positions(cell_count, desired, rng)
        .into_iter()
        .map(|i| CellPosition {
            row: i / cols,
            col: i % cols,
        })
        .collect();

    GapSet {
        positions,
        cell_count,
    }
}

/// Like [`select_gaps`] but refuses the 1×1 degenerate case.
pub fn select_gaps_strict(grid: &Grid, desired: usize, rng: &mut impl Rng) -> Result<GapSet> {
    if grid.cell_count() <= 1 {
        return Err(ForgeError::UnsolvableGapRequest {
            cells: grid.cell_count(),
        });
    }
    Ok(select_gaps(grid, desired, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::model::build_grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gap_count_clamps() {
        assert_eq!(gap_count(1, 3), 0);
        assert_eq!(gap_count(2, 3), 1);
        assert_eq!(gap_count(4, 0), 1);
        assert_eq!(gap_count(4, 3), 2);
        assert_eq!(gap_count(6, 2), 2);
        assert_eq!(gap_count(9, 10), 4);
    }

    #[test]
    fn test_single_cell_grid_has_no_gaps() {
        let grid = build_grid(7, 8).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(select_gaps(&grid, 2, &mut rng).is_empty());
        assert!(matches!(
            select_gaps_strict(&grid, 2, &mut rng),
            Err(ForgeError::UnsolvableGapRequest { cells: 1 })
        ));
    }

    #[test]
    fn test_gaps_are_distinct_cells_in_grid() {
        let grid = build_grid(347, 26).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let gaps = select_gaps(&grid, 3, &mut rng);

        assert_eq!(gaps.len(), 3);
        let mut seen = gaps.positions().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
        for pos in gaps.iter() {
            assert!(grid.cell(pos.row, pos.col).is_some());
        }
    }

    #[test]
    fn test_selection_reproducible_for_seed() {
        let grid = build_grid(4567, 38).unwrap();
        let first = select_gaps(&grid, 3, &mut ChaCha8Rng::seed_from_u64(7));
        let second = select_gaps(&grid, 3, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_contains() {
        let grid = build_grid(47, 26).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let gaps = select_gaps(&grid, 1, &mut rng);
        let pos = gaps.positions()[0];
        assert!(gaps.contains(pos.row, pos.col));
        assert_eq!(gaps.cell_count(), 4);
    }
}
