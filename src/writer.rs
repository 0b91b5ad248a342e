//! Writes payload values into resolved cells

use crate::config::WriterConfig;
use crate::grid::{CellValue, GridMut};
use crate::normalize::normalize;
use crate::types::{CellMapping, Payload};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// What a write pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Payload values placed into cells
    pub written: usize,
    /// Mapped cells left alone because they hold a formula
    pub formulas_protected: usize,
    /// Values written as-is because they were not integers
    pub raw_fallbacks: usize,
    /// Cells set to zero by the forced-zero rows
    pub forced_zero: usize,
}

/// Convert a payload value to what goes into the cell.
///
/// Integers where the value converts (JSON integers, finite floats truncated
/// toward zero, booleans as 0/1, strings holding an integer); otherwise the
/// raw value. `null` means nothing to write.
pub fn coerce(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(CellValue::Int(i64::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(CellValue::Int(i));
            }
            let f = n.as_f64()?;
            let truncated = f.trunc();
            if f.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
                Some(CellValue::Int(truncated as i64))
            } else {
                Some(CellValue::Number(f))
            }
        }
        Value::String(s) => Some(match s.trim().parse::<i64>() {
            Ok(i) => CellValue::Int(i),
            Err(_) => CellValue::Text(s.clone()),
        }),
        other => Some(CellValue::Text(other.to_string())),
    }
}

/// Fills mapped cells from a payload.
///
/// Iterates the mapping, never the payload, so keys the mapping does not know
/// cannot reach any cell. Formula cells are never written.
#[derive(Debug, Clone, Default)]
pub struct ValueWriter {
    config: WriterConfig,
}

impl ValueWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn write(
        &self,
        grid: &mut dyn GridMut,
        mapping: &CellMapping,
        payload: &Payload,
    ) -> WriteReport {
        let mut report = WriteReport::default();

        for (label, departments) in mapping.iter() {
            for (department, cells) in departments {
                for (sub, cell) in cells.cells() {
                    if grid.holds_formula(cell.row, cell.column) {
                        report.formulas_protected += 1;
                        continue;
                    }
                    let Some(raw) = payload.value(label, *department, sub) else {
                        continue;
                    };
                    let Some(value) = coerce(raw) else {
                        continue;
                    };
                    if !matches!(value, CellValue::Int(_)) {
                        warn!(
                            label,
                            department = department.name(),
                            sub = sub.key(),
                            value = %raw,
                            "value is not an integer, writing it unchanged"
                        );
                        report.raw_fallbacks += 1;
                    }
                    grid.write_value(cell.row, cell.column, &value);
                    report.written += 1;
                }
            }
        }

        self.force_zero_rows(grid, mapping, &mut report);

        debug!(
            written = report.written,
            formulas_protected = report.formulas_protected,
            raw_fallbacks = report.raw_fallbacks,
            forced_zero = report.forced_zero,
            "write pass complete"
        );
        report
    }

    /// Zero every mapped cell of the forced-zero rows, formulas excepted
    fn force_zero_rows(&self, grid: &mut dyn GridMut, mapping: &CellMapping, report: &mut WriteReport) {
        let forced: HashSet<String> = self
            .config
            .forced_zero_labels
            .iter()
            .map(|l| normalize(l))
            .collect();

        for (label, departments) in mapping.iter() {
            if !forced.contains(&normalize(label)) {
                continue;
            }
            for cells in departments.values() {
                for (_, cell) in cells.cells() {
                    if grid.holds_formula(cell.row, cell.column) {
                        continue;
                    }
                    grid.write_value(cell.row, cell.column, &CellValue::Int(0));
                    report.forced_zero += 1;
                }
            }
        }
    }
}
