use super::{starts_like_formula, Grid};
use crate::error::{SiteSplitError, SiteSplitResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;

/// Read-only grid over a calamine value range and its formula range
pub struct CalamineGrid {
    values: Range<Data>,
    formulas: Option<Range<String>>,
}

impl CalamineGrid {
    pub fn new(values: Range<Data>, formulas: Option<Range<String>>) -> Self {
        Self { values, formulas }
    }

    /// Open a workbook and load the sheet whose name contains `prefer`
    /// (case-insensitive), falling back to the first sheet.
    ///
    /// Returns the chosen sheet name with the grid.
    pub fn open(path: &Path, prefer: Option<&str>) -> SiteSplitResult<(String, Self)> {
        if !path.exists() {
            return Err(SiteSplitError::TemplateNotFound(path.to_path_buf()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            SiteSplitError::Spreadsheet(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let preferred = prefer.map(str::to_lowercase).and_then(|wanted| {
            sheet_names
                .iter()
                .find(|name| name.to_lowercase().contains(&wanted))
                .cloned()
        });
        let sheet_name = preferred
            .or_else(|| sheet_names.first().cloned())
            .ok_or_else(|| SiteSplitError::WorksheetNotFound(path.display().to_string()))?;

        let values = workbook.worksheet_range(&sheet_name).map_err(|e| {
            SiteSplitError::Spreadsheet(format!("Failed to read sheet {}: {}", sheet_name, e))
        })?;
        let formulas = workbook.worksheet_formula(&sheet_name).ok();

        Ok((sheet_name, Self::new(values, formulas)))
    }

    fn formula(&self, row: u32, column: u32) -> Option<&String> {
        if row == 0 || column == 0 {
            return None;
        }
        self.formulas
            .as_ref()
            .and_then(|range| range.get_value((row - 1, column - 1)))
            .filter(|f| !f.is_empty())
    }

    fn value(&self, row: u32, column: u32) -> Option<&Data> {
        if row == 0 || column == 0 {
            return None;
        }
        self.values.get_value((row - 1, column - 1))
    }
}

impl Grid for CalamineGrid {
    fn cell_text(&self, row: u32, column: u32) -> Option<String> {
        if let Some(formula) = self.formula(row, column) {
            return Some(format!("={}", formula));
        }
        match self.value(row, column)? {
            Data::Empty => None,
            Data::String(s) if s.is_empty() => None,
            Data::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn label_text(&self, row: u32, column: u32) -> Option<String> {
        if let Some(formula) = self.formula(row, column) {
            return Some(format!("={}", formula));
        }
        match self.value(row, column)? {
            Data::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    fn holds_formula(&self, row: u32, column: u32) -> bool {
        if self.formula(row, column).is_some() {
            return true;
        }
        matches!(self.value(row, column), Some(Data::String(s)) if starts_like_formula(s))
    }

    fn last_row(&self) -> u32 {
        let values = self.values.end().map(|(r, _)| r + 1).unwrap_or(0);
        let formulas = self
            .formulas
            .as_ref()
            .and_then(|f| f.end())
            .map(|(r, _)| r + 1)
            .unwrap_or(0);
        values.max(formulas)
    }

    fn last_column(&self) -> u32 {
        let values = self.values.end().map(|(_, c)| c + 1).unwrap_or(0);
        let formulas = self
            .formulas
            .as_ref()
            .and_then(|f| f.end())
            .map(|(_, c)| c + 1)
            .unwrap_or(0);
        values.max(formulas)
    }
}
