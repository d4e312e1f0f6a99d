//! Partial products: the grid written out line by line
//!
//! ```text
//! 40 × 20 = 800
//! 7 × 20 = 140
//! 40 × 6 = 240
//! 7 × 6 = 42
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::model::Grid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialProduct {
    /// Part of the first operand
    pub factor1: u64,
    /// Part of the second operand
    pub factor2: u64,
    /// "40 × 20"
    pub expression: String,
    pub value: u64,
}

/// Read-only projection of a [`Grid`], one line per cell in row-major order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialProductsView {
    products: Vec<PartialProduct>,
    total: u64,
}

impl PartialProductsView {
    pub(crate) fn from_grid(grid: &Grid) -> Self {
        let products = grid
            .iter_cells()
            .map(|cell| PartialProduct {
                factor1: cell.col_value,
                factor2: cell.row_value,
                expression: format!("{} × {}", cell.col_value, cell.row_value),
                value: cell.product,
            })
            .collect();

        Self {
            products,
            total: grid.total(),
        }
    }

    pub fn products(&self) -> &[PartialProduct] {
        &self.products
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// One "a × b = p" line per product
    pub fn working_out(&self) -> String {
        self.products
            .iter()
            .map(|p| format!("{} = {}", p.expression, p.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// "800 + 140 + 240 + 42"
    pub fn sum_expression(&self) -> String {
        self.products
            .iter()
            .map(|p| p.value.to_string())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Index of a line to hide, or None when the view has a single line
    /// (the caller should ask for the total instead).
    pub fn select_gap_line(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.products.len() <= 1 {
            return None;
        }
        Some(rng.gen_range(0..self.products.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::model::build_grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_partial_products_47_by_26() {
        let view = build_grid(47, 26).unwrap().partial_products();

        let values: Vec<u64> = view.products().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![800, 140, 240, 42]);
        assert_eq!(view.products()[0].expression, "40 × 20");
        assert_eq!(view.products()[1].factor1, 7);
        assert_eq!(view.products()[1].factor2, 20);
        assert_eq!(view.total(), 1222);
    }

    #[test]
    fn test_values_sum_to_total() {
        let view = build_grid(908, 75).unwrap().partial_products();
        let sum: u64 = view.products().iter().map(|p| p.value).sum();
        assert_eq!(sum, view.total());
        assert_eq!(sum, 908 * 75);
    }

    #[test]
    fn test_working_out_and_sum_expression() {
        let view = build_grid(47, 26).unwrap().partial_products();
        assert_eq!(
            view.working_out(),
            "40 × 20 = 800\n7 × 20 = 140\n40 × 6 = 240\n7 × 6 = 42"
        );
        assert_eq!(view.sum_expression(), "800 + 140 + 240 + 42");
    }

    #[test]
    fn test_gap_line_skips_single_product() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let single = build_grid(3, 4).unwrap().partial_products();
        assert_eq!(single.select_gap_line(&mut rng), None);

        let view = build_grid(47, 26).unwrap().partial_products();
        let line = view.select_gap_line(&mut rng).unwrap();
        assert!(line < view.len());
    }
}
