//! Grid ("box method") multiplication
//!
//! build_grid -> Grid -> (select_gaps | partial_products) -> template layer

pub mod gaps;
pub mod model;
pub mod partial;

pub use gaps::{gap_count, select_gaps, select_gaps_strict, select_positions, CellPosition, GapSet};
pub use model::{build_grid, BoxMethodWorkflow, Grid, GridCell};
pub use partial::{PartialProduct, PartialProductsView};
