//! Read-only scanner tests

mod common;

use common::{canonical_book, save, LABEL_ROWS};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{Formula, Workbook, XlsxError};
use site_split::config::ResolverConfig;
use site_split::resolver::StaticTableResolver;
use site_split::scanner::{scan_template, STATIC_TABLE_BANNER};
use site_split::{CellMapping, Department};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two-sheet workbook: a notes sheet first, then the attendance sheet with
/// a two-row header band (department on row 4, role on row 5).
fn write_two_row_header_template(dir: &Path) -> Result<PathBuf, XlsxError> {
    let path = dir.join("two_row.xlsx");
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes")?;
    notes.write_string(0, 0, "Inbound AMZN")?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Daily Attendance")?;
    sheet.write_string(2, 0, "Attendance  Details")?;

    // (column, department row text, role row text), 0-based columns
    let headers = [
        (1, "Inbound", "AMZN"),
        (2, "Inbound", "TEMP"),
        (3, "DA", "AMZN"),
        (4, "DA", "TEMP"),
        (5, "ICQA", "AMZN"),
        (6, "ICQA", "TEMP"),
        (7, "ICQA", "TOTAL"),
        (8, "IXD", "AMZN"),
        (9, "IXD", "TEMP"),
    ];
    for (column, dept, role) in headers {
        sheet.write_string(3, column, dept)?;
        sheet.write_string(4, column, role)?;
    }

    for (label, row) in LABEL_ROWS {
        let row = row - 1;
        sheet.write_string(row, 0, label)?;
        sheet.write_formula(row, 7, Formula::new(format!("=F{0}+G{0}", row + 1)))?;
    }

    workbook.save(&path)?;
    Ok(path)
}

// ═══════════════════════════════════════════════════════════════════════════
// SCAN RESULTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_scan_canonical_template() {
    let dir = TempDir::new().unwrap();
    let template = save(&canonical_book(), dir.path(), "Site_Split.xlsx");

    let report = scan_template(&template, &ResolverConfig::default()).unwrap();
    assert_eq!(report.sheet, "Attendance");
    assert_eq!(report.scan.anchor_row, 3);
    assert_eq!(report.scan.mapping, StaticTableResolver::builtin_table());
}

#[test]
fn test_scan_prefers_attendance_sheet_and_two_row_band() {
    let dir = TempDir::new().unwrap();
    let template = write_two_row_header_template(dir.path()).unwrap();

    let report = scan_template(&template, &ResolverConfig::default()).unwrap();
    assert_eq!(report.sheet, "Daily Attendance");
    assert_eq!(report.scan.anchor_row, 3);

    let summary = report.column_summary();
    assert_eq!(
        summary,
        vec![
            (Department::Inbound, "B".to_string(), "C".to_string()),
            (Department::Da, "D".to_string(), "E".to_string()),
            (Department::Icqa, "F".to_string(), "G".to_string()),
            (Department::Crets, "I".to_string(), "J".to_string()),
        ]
    );
    assert_eq!(
        report
            .scan
            .mapping
            .cell("MET Present", Department::Crets, site_split::SubCategory::Temp)
            .map(|c| c.to_string()),
        Some("J19".to_string())
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_rendered_table_round_trips_as_static_map() {
    let dir = TempDir::new().unwrap();
    let template = save(&canonical_book(), dir.path(), "Site_Split.xlsx");

    let report = scan_template(&template, &ResolverConfig::default()).unwrap();
    let rendered = report.render().unwrap();

    let (banner, json) = rendered.split_once('\n').unwrap();
    assert_eq!(banner, STATIC_TABLE_BANNER);
    let table = CellMapping::from_json_str(json).unwrap();
    assert_eq!(table, report.scan.mapping);
    assert!(json.contains("\"VTO\""));
    assert!(json.contains("\"B12\""));
}

#[test]
fn test_scan_missing_template() {
    let dir = TempDir::new().unwrap();
    let err = scan_template(&dir.path().join("missing.xlsx"), &ResolverConfig::default())
        .unwrap_err();
    assert!(err.is_not_found());
}
