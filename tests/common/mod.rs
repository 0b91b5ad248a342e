//! Shared fixtures: a Site Split template built with umya-spreadsheet
#![allow(dead_code)]

use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use umya_spreadsheet::Spreadsheet;

pub const LABEL_ROWS: [(&str, u32); 10] = [
    ("Regular HC (Cohort Expected)", 6),
    ("Regular HC Present (Excluding Swaps)", 7),
    ("Shift Swap Out ", 8),
    ("Shift Swap Expected", 9),
    ("Shift Swap Present ", 10),
    ("VTO", 12),
    ("VET Accepted", 13),
    ("VET Present", 14),
    ("MET Expected", 18),
    ("MET Present", 19),
];

/// Header row of the canonical layout, column B onwards
pub const CANONICAL_HEADERS: [&str; 11] = [
    "Inbound - AMZN",
    "Inbound TEMP",
    "DA AMZN",
    "DA TEMP",
    "SDC TOTAL",
    "ICQA AMZN",
    "ICQA TEMP",
    "% TOTAL",
    "CRÉTS AMZN",
    "CRETs TEMP",
    "IXD TOTAL",
];

/// Workbook with the canonical layout:
/// sentinel in A3, headers in row 4, labels in column A,
/// totals as formulas in F, I and L, plus one formula (H14) inside a mapped cell.
pub fn canonical_book() -> Spreadsheet {
    book_with_headers(&CANONICAL_HEADERS)
}

/// Same rows as [`canonical_book`] but with custom headers starting in column B.
///
/// Total formulas are only added to columns whose header contains `TOTAL`.
pub fn book_with_headers(headers: &[&str]) -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();
    sheet.set_name("Attendance");

    sheet.get_cell_mut("A1").set_value_string("Site Split");
    sheet.get_cell_mut("A3").set_value_string("ATTENDANCE DETAILS");

    for (i, header) in headers.iter().enumerate() {
        let column = i as u32 + 2;
        sheet.get_cell_mut((column, 4)).set_value_string(*header);
    }

    for (label, row) in LABEL_ROWS {
        sheet.get_cell_mut((1, row)).set_value_string(label);
        for (i, header) in headers.iter().enumerate() {
            if !header.to_uppercase().contains("TOTAL") {
                continue;
            }
            let column = i as u32 + 2;
            let formula = format!("SUM(B{row}:{}{row})", column_name(column - 1));
            sheet.get_cell_mut((column, row)).set_formula(formula);
        }
    }
    sheet.get_cell_mut("A11").set_value_string("Net Present");
    sheet.get_cell_mut("B11").set_formula("B7+B10");

    if headers == &CANONICAL_HEADERS[..] {
        sheet.get_cell_mut("H14").set_formula("H13");
    }

    book
}

/// AMZN/TEMP columns of the canonical layout
pub const MAPPED_COLUMNS: [&str; 8] = ["B", "C", "D", "E", "G", "H", "J", "K"];

/// Canonical workbook where every mapped cell holds a formula.
///
/// Returns the book with the `(cell, formula)` pairs that were set.
pub fn all_formula_book() -> (Spreadsheet, Vec<(String, String)>) {
    let mut book = canonical_book();
    let sheet = book.get_sheet_mut(&0).unwrap();
    let mut formulas = Vec::new();
    for (_, row) in LABEL_ROWS {
        for column in MAPPED_COLUMNS {
            let cell = format!("{column}{row}");
            let formula = format!("{column}{}*2", row - 1);
            sheet.get_cell_mut(cell.as_str()).set_formula(formula.clone());
            formulas.push((cell, formula));
        }
    }
    (book, formulas)
}

/// Payload hitting every label, department and role with every JSON value
/// kind, plus keys no mapping knows
pub fn every_kind_payload() -> serde_json::Value {
    let kinds = [
        serde_json::json!(7),
        serde_json::json!(-3.75),
        serde_json::json!(1e300),
        serde_json::json!("12"),
        serde_json::json!("=SUM(A1:A9)"),
        serde_json::json!(""),
        serde_json::json!(true),
        serde_json::json!([1, 2]),
        serde_json::json!({"nested": {"AMZN": 1}}),
        serde_json::json!(u64::MAX),
    ];
    let mut rows = serde_json::Map::new();
    let mut n = 0;
    for (label, _) in LABEL_ROWS {
        let mut depts = serde_json::Map::new();
        for dept in ["Inbound", "DA", "ICQA", "CRETs", "IXD", "SDC"] {
            let mut roles = serde_json::Map::new();
            for role in ["AMZN", "TEMP", "TOTAL", "CELL"] {
                roles.insert(role.to_string(), kinds[n % kinds.len()].clone());
                n += 1;
            }
            depts.insert(dept.to_string(), serde_json::Value::Object(roles));
        }
        rows.insert(label.to_string(), serde_json::Value::Object(depts));
    }
    rows.insert("SDC TOTAL".to_string(), serde_json::json!({"Inbound": {"AMZN": 99}}));
    rows.insert("F12".to_string(), serde_json::json!(42));
    rows.insert("VTO ".to_string(), serde_json::json!({"Inbound": {"AMZN": 5}}));
    serde_json::Value::Object(rows)
}

pub fn column_name(column: u32) -> String {
    site_split::types::column_letter(column)
}

/// Save a workbook into `dir` and return its path
pub fn save(book: &Spreadsheet, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    umya_spreadsheet::writer::xlsx::write(book, &path).unwrap();
    path
}

/// Read back exported bytes: (values, formulas) of the first sheet
pub struct ReadBack {
    pub values: calamine::Range<Data>,
    pub formulas: calamine::Range<String>,
}

impl ReadBack {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec())).unwrap();
        let name = workbook.sheet_names()[0].clone();
        let values = workbook.worksheet_range(&name).unwrap();
        let formulas = workbook.worksheet_formula(&name).unwrap();
        Self { values, formulas }
    }

    /// Numeric value of a cell such as `B12`
    pub fn number(&self, cell: &str) -> Option<f64> {
        let (row, column) = position(cell);
        match self.values.get_value((row, column))? {
            Data::Float(f) => Some(*f),
            Data::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn text(&self, cell: &str) -> Option<String> {
        let (row, column) = position(cell);
        match self.values.get_value((row, column))? {
            Data::Empty => None,
            other => Some(other.to_string()),
        }
    }

    pub fn formula(&self, cell: &str) -> Option<String> {
        let (row, column) = position(cell);
        self.formulas
            .get_value((row, column))
            .filter(|f| !f.is_empty())
            .cloned()
    }
}

/// 0-based (row, column) of an A1 reference
fn position(cell: &str) -> (u32, u32) {
    let cell: site_split::CellRef = cell.parse().unwrap();
    (cell.row - 1, cell.column - 1)
}
