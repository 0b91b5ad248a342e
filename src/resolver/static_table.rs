use super::CellResolver;
use crate::config::DEFAULT_LABELS;
use crate::grid::Grid;
use crate::types::{CellMapping, CellRef, Department, DeptCells};
use indexmap::IndexMap;

/// Rows of the canonical template, aligned with `DEFAULT_LABELS`
const BUILTIN_ROWS: [u32; 10] = [6, 7, 8, 9, 10, 12, 13, 14, 18, 19];

/// AMZN/TEMP columns of the canonical template; F and L hold the SDC and IXD
/// totals and are never targets
const BUILTIN_COLUMNS: [(Department, u32, u32); 4] = [
    (Department::Inbound, 2, 3),
    (Department::Da, 4, 5),
    (Department::Icqa, 7, 8),
    (Department::Crets, 10, 11),
];

/// Returns a fixed table regardless of the sheet's contents
#[derive(Debug, Clone)]
pub struct StaticTableResolver {
    table: CellMapping,
}

impl StaticTableResolver {
    pub fn new(table: CellMapping) -> Self {
        Self { table }
    }

    /// Cell table of the canonical Site Split template
    pub fn builtin_table() -> CellMapping {
        let mut table = CellMapping::new();
        for (label, row) in DEFAULT_LABELS.iter().zip(BUILTIN_ROWS) {
            let depts: IndexMap<Department, DeptCells> = BUILTIN_COLUMNS
                .iter()
                .map(|&(dept, amzn, temp)| {
                    (
                        dept,
                        DeptCells {
                            amzn: CellRef::new(row, amzn),
                            temp: CellRef::new(row, temp),
                        },
                    )
                })
                .collect();
            table.insert(*label, depts);
        }
        table
    }

    pub fn table(&self) -> &CellMapping {
        &self.table
    }
}

impl Default for StaticTableResolver {
    fn default() -> Self {
        Self::new(Self::builtin_table())
    }
}

impl CellResolver for StaticTableResolver {
    fn name(&self) -> &'static str {
        "static"
    }

    fn resolve(&self, _grid: &dyn Grid) -> CellMapping {
        self.table.clone()
    }
}
