//! Box method grid for multiplication
//!
//! 47 × 26 decomposes to 47 = 40 + 7 (columns) and 26 = 20 + 6 (rows):
//!
//! ```text
//!        40     7
//!    20  800   140
//!     6  240    42
//! ```
//!
//! Total: 800 + 140 + 240 + 42 = 1222

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};
use crate::grid::partial::PartialProductsView;
use crate::place_value::decompose;

/// One row × column product in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row_value: u64,
    pub col_value: u64,
    pub product: u64,
    pub row_index: usize,
    pub col_index: usize,
}

/// Grid multiplication model of `a × b`
///
/// Columns hold the parts of `a`, rows the parts of `b`. `total` always
/// equals `a * b`; construction fails instead of wrapping on overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    a: u64,
    b: u64,
    rows: Vec<u64>,
    cols: Vec<u64>,
    cells: Vec<Vec<GridCell>>,
    total: u64,
}

/// Build the box method grid for `a × b`.
pub fn build_grid(a: u64, b: u64) -> Result<Grid> {
    if a == 0 || b == 0 {
        return Err(ForgeError::InvalidInput(format!(
            "grid operands must be positive, got {} × {}",
            a, b
        )));
    }

    let cols = decompose(a).into_parts();
    let rows = decompose(b).into_parts();

    let mut cells = Vec::with_capacity(rows.len());
    let mut total: u64 = 0;

    for (row_index, &row_value) in rows.iter().enumerate() {
        let mut row = Vec::with_capacity(cols.len());
        for (col_index, &col_value) in cols.iter().enumerate() {
            let product = col_value
                .checked_mul(row_value)
                .ok_or_else(|| ForgeError::Overflow(format!("{} × {}", col_value, row_value)))?;
            total = total
                .checked_add(product)
                .ok_or_else(|| ForgeError::Overflow(format!("{} × {}", a, b)))?;
            row.push(GridCell {
                row_value,
                col_value,
                product,
                row_index,
                col_index,
            });
        }
        cells.push(row);
    }

    Ok(Grid {
        a,
        b,
        rows,
        cols,
        cells,
        total,
    })
}

impl Grid {
    /// Operand whose parts head the columns
    pub fn a(&self) -> u64 {
        self.a
    }

    /// Operand whose parts head the rows
    pub fn b(&self) -> u64 {
        self.b
    }

    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    pub fn cols(&self) -> &[u64] {
        &self.cols
    }

    pub fn cells(&self) -> &[Vec<GridCell>] {
        &self.cells
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flatten()
    }

    /// Cell products in row-major order
    pub fn products(&self) -> Vec<u64> {
        self.iter_cells().map(|c| c.product).collect()
    }

    /// Uniformly chosen cell, e.g. to ask for a single partial product
    pub fn random_cell(&self, rng: &mut impl Rng) -> &GridCell {
        let index = rng.gen_range(0..self.cell_count());
        &self.cells[index / self.num_cols()][index % self.num_cols()]
    }

    /// Linear view of the same products
    pub fn partial_products(&self) -> PartialProductsView {
        PartialProductsView::from_grid(self)
    }
}

/// Everything a multi-step box method question walks through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxMethodWorkflow {
    /// "47 × 26"
    pub multiplication: String,
    pub answer: u64,
    /// Parts of the first operand (grid columns)
    pub first_parts: Vec<u64>,
    /// Parts of the second operand (grid rows)
    pub second_parts: Vec<u64>,
    pub grid: Grid,
    pub partials: PartialProductsView,
    /// "800 + 140 + 240 + 42"
    pub sum: String,
}

impl BoxMethodWorkflow {
    pub fn new(a: u64, b: u64) -> Result<Self> {
        let grid = build_grid(a, b)?;
        let partials = grid.partial_products();

        Ok(Self {
            multiplication: format!("{} × {}", a, b),
            answer: grid.total(),
            first_parts: grid.cols().to_vec(),
            second_parts: grid.rows().to_vec(),
            sum: partials.sum_expression(),
            partials,
            grid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_box_grid_47_by_26() {
        let grid = build_grid(47, 26).unwrap();

        assert_eq!(grid.rows(), &[20, 6]);
        assert_eq!(grid.cols(), &[40, 7]);
        assert_eq!(grid.products(), vec![800, 140, 240, 42]);
        assert_eq!(grid.total(), 1222);
    }

    #[test]
    fn test_cell_indices_match_position() {
        let grid = build_grid(347, 26).unwrap();
        for cell in grid.iter_cells() {
            assert_eq!(grid.rows()[cell.row_index], cell.row_value);
            assert_eq!(grid.cols()[cell.col_index], cell.col_value);
            assert_eq!(cell.product, cell.row_value * cell.col_value);
        }
        assert_eq!(grid.cell_count(), 6);
    }

    #[test]
    fn test_single_digit_operands_make_one_cell() {
        let grid = build_grid(7, 8).unwrap();
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.total(), 56);
    }

    #[test]
    fn test_one_row_grid() {
        let grid = build_grid(123, 4).unwrap();
        assert_eq!(grid.num_rows(), 1);
        assert_eq!(grid.num_cols(), 3);
        assert_eq!(grid.total(), 492);
    }

    #[test]
    fn test_zero_operand_rejected() {
        assert!(matches!(build_grid(0, 5), Err(ForgeError::InvalidInput(_))));
        assert!(matches!(build_grid(5, 0), Err(ForgeError::InvalidInput(_))));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            build_grid(u64::MAX, 20),
            Err(ForgeError::Overflow(_))
        ));
    }

    #[test]
    fn test_random_cell_is_in_grid() {
        let grid = build_grid(47, 26).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let cell = grid.random_cell(&mut rng);
            assert_eq!(grid.cell(cell.row_index, cell.col_index), Some(cell));
        }
    }

    #[test]
    fn test_workflow_bundles_steps() {
        let workflow = BoxMethodWorkflow::new(47, 26).unwrap();
        assert_eq!(workflow.multiplication, "47 × 26");
        assert_eq!(workflow.answer, 1222);
        assert_eq!(workflow.first_parts, vec![40, 7]);
        assert_eq!(workflow.second_parts, vec![20, 6]);
        assert_eq!(workflow.sum, "800 + 140 + 240 + 42");
        assert_eq!(workflow.partials.total(), workflow.grid.total());
    }
}
