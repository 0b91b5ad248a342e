//! Offline template scan
//!
//! Runs the header-scan resolver against any template and renders the result
//! as a JSON table that can be saved and used as the static fallback map.

use crate::config::ResolverConfig;
use crate::error::SiteSplitResult;
use crate::grid::CalamineGrid;
use crate::resolver::{HeaderScan, HeaderScanResolver};
use crate::types::{column_letter, Department, SubCategory};
use std::path::{Path, PathBuf};

/// Sheets whose name contains this are scanned before the first sheet
pub const PREFERRED_SHEET: &str = "attendance";

pub const STATIC_TABLE_BANNER: &str =
    "# ---- SITE_SPLIT_MAP (save as JSON and set `static_map` in the export config) ----";

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub template: PathBuf,
    pub sheet: String,
    pub scan: HeaderScan,
}

impl ScanReport {
    /// The mapping as pretty JSON
    pub fn static_table_json(&self) -> SiteSplitResult<String> {
        self.scan.mapping.to_json_pretty()
    }

    /// Banner line followed by the JSON table
    pub fn render(&self) -> SiteSplitResult<String> {
        Ok(format!("{}\n{}", STATIC_TABLE_BANNER, self.static_table_json()?))
    }

    /// `(department, AMZN letter, TEMP letter)` for every department found,
    /// `-` where a side is missing
    pub fn column_summary(&self) -> Vec<(Department, String, String)> {
        Department::ALL
            .iter()
            .filter_map(|&dept| {
                let letter = |sub: SubCategory| {
                    self.scan
                        .columns
                        .get(&(dept, sub))
                        .map(|&c| column_letter(c))
                };
                let amzn = letter(SubCategory::Amzn);
                let temp = letter(SubCategory::Temp);
                if amzn.is_none() && temp.is_none() {
                    return None;
                }
                Some((
                    dept,
                    amzn.unwrap_or_else(|| "-".to_string()),
                    temp.unwrap_or_else(|| "-".to_string()),
                ))
            })
            .collect()
    }
}

/// Scan a template file read-only
pub fn scan_template(path: &Path, config: &ResolverConfig) -> SiteSplitResult<ScanReport> {
    let (sheet, grid) = CalamineGrid::open(path, Some(PREFERRED_SHEET))?;
    let scan = HeaderScanResolver::new(config.clone()).scan(&grid);

    Ok(ScanReport {
        template: path.to_path_buf(),
        sheet,
        scan,
    })
}
