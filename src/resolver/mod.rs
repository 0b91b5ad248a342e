//! Cell mapping producers
//!
//! A resolver turns a loaded sheet into a [`CellMapping`]. Resolution never
//! fails: anything that cannot be located is left out of the mapping, and the
//! writer treats missing entries as nothing to write.

mod header_scan;
mod static_table;

pub use header_scan::{ColumnTargets, HeaderScan, HeaderScanResolver};
pub use static_table::StaticTableResolver;

use crate::grid::Grid;
use crate::types::CellMapping;

pub trait CellResolver {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn resolve(&self, grid: &dyn Grid) -> CellMapping;
}
