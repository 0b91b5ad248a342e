use super::{starts_like_formula, CellValue, Grid, GridMut};
use crate::error::{SiteSplitError, SiteSplitResult};
use umya_spreadsheet::{Spreadsheet, Worksheet};

impl Grid for Worksheet {
    fn cell_text(&self, row: u32, column: u32) -> Option<String> {
        let cell = self.get_cell((column, row))?;
        if cell.is_formula() {
            return Some(format!("={}", cell.get_formula()));
        }
        let value = cell.get_value();
        if value.is_empty() {
            None
        } else {
            Some(value.into_owned())
        }
    }

    fn label_text(&self, row: u32, column: u32) -> Option<String> {
        let cell = self.get_cell((column, row))?;
        if !cell.is_formula() && matches!(cell.get_data_type(), "n" | "b" | "e") {
            return None;
        }
        self.cell_text(row, column)
    }

    fn holds_formula(&self, row: u32, column: u32) -> bool {
        self.get_cell((column, row))
            .map(|cell| cell.is_formula() || starts_like_formula(&cell.get_value()))
            .unwrap_or(false)
    }

    fn last_row(&self) -> u32 {
        self.get_highest_row()
    }

    fn last_column(&self) -> u32 {
        self.get_highest_column()
    }
}

impl GridMut for Worksheet {
    fn write_value(&mut self, row: u32, column: u32, value: &CellValue) {
        let cell = self.get_cell_mut((column, row));
        match value {
            CellValue::Int(n) => {
                cell.set_value_number(*n as f64);
            }
            CellValue::Number(n) => {
                cell.set_value_number(*n);
            }
            CellValue::Text(text) => {
                cell.set_value_string(text.clone());
            }
            CellValue::Bool(b) => {
                cell.set_value_bool(*b);
            }
        }
    }
}

/// Pick the sheet to fill.
///
/// With a hint, the first sheet whose name contains it (case-insensitive);
/// without one, the workbook's active sheet.
pub fn select_sheet<'a>(
    book: &'a mut Spreadsheet,
    hint: Option<&str>,
) -> SiteSplitResult<&'a mut Worksheet> {
    let Some(hint) = hint else {
        return Ok(book.get_active_sheet_mut());
    };

    let wanted = hint.to_lowercase();
    let index = book
        .get_sheet_collection()
        .iter()
        .position(|sheet| sheet.get_name().to_lowercase().contains(&wanted))
        .ok_or_else(|| SiteSplitError::WorksheetNotFound(hint.to_string()))?;

    book.get_sheet_mut(&index)
        .ok_or_else(|| SiteSplitError::WorksheetNotFound(hint.to_string()))
}
