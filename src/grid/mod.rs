//! Cell-grid access used by the resolver and writer
//!
//! Both sides work against these traits, never against a concrete workbook
//! type. The export path edits a `umya_spreadsheet::Worksheet`; the read-only
//! scanner goes through [`CalamineGrid`].

mod calamine_grid;
mod worksheet;

pub use calamine_grid::CalamineGrid;
pub use worksheet::select_sheet;

/// Read access to a sheet, 1-based rows and columns
pub trait Grid {
    /// Display text of a cell. Formula cells yield `=` followed by the formula;
    /// blank cells yield `None`.
    fn cell_text(&self, row: u32, column: u32) -> Option<String>;

    /// Like [`Grid::cell_text`] but only for string and formula cells; numeric
    /// and boolean cells yield `None`. Header and label matching reads this.
    fn label_text(&self, row: u32, column: u32) -> Option<String> {
        self.cell_text(row, column)
    }

    /// True when the cell holds a formula or literal text starting with `=`
    fn holds_formula(&self, row: u32, column: u32) -> bool;

    /// Last used row
    fn last_row(&self) -> u32;

    /// Last used column
    fn last_column(&self) -> u32;
}

/// A value the writer places into a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Number(f64),
    Text(String),
    Bool(bool),
}

pub trait GridMut: Grid {
    fn write_value(&mut self, row: u32, column: u32, value: &CellValue);
}

pub(crate) fn starts_like_formula(text: &str) -> bool {
    text.starts_with('=')
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{CellValue, Grid, GridMut};
    use crate::types::CellRef;
    use std::collections::HashMap;

    /// Sparse in-memory grid; text starting with `=` counts as a formula
    #[derive(Debug, Default)]
    pub struct MemGrid {
        cells: HashMap<(u32, u32), String>,
    }

    impl MemGrid {
        pub fn set(&mut self, cell: &str, text: &str) {
            let cell: CellRef = cell.parse().unwrap();
            self.cells.insert((cell.row, cell.column), text.to_string());
        }

        pub fn get(&self, cell: &str) -> Option<&str> {
            let cell: CellRef = cell.parse().unwrap();
            self.cells.get(&(cell.row, cell.column)).map(String::as_str)
        }
    }

    impl Grid for MemGrid {
        fn cell_text(&self, row: u32, column: u32) -> Option<String> {
            self.cells.get(&(row, column)).cloned()
        }

        fn holds_formula(&self, row: u32, column: u32) -> bool {
            self.cells
                .get(&(row, column))
                .is_some_and(|t| super::starts_like_formula(t))
        }

        fn last_row(&self) -> u32 {
            self.cells.keys().map(|(r, _)| *r).max().unwrap_or(0)
        }

        fn last_column(&self) -> u32 {
            self.cells.keys().map(|(_, c)| *c).max().unwrap_or(0)
        }
    }

    impl GridMut for MemGrid {
        fn write_value(&mut self, row: u32, column: u32, value: &CellValue) {
            let text = match value {
                CellValue::Int(n) => n.to_string(),
                CellValue::Number(n) => n.to_string(),
                CellValue::Text(t) => t.clone(),
                CellValue::Bool(b) => b.to_string(),
            };
            self.cells.insert((row, column), text);
        }
    }
}
