//! Request-scoped export: template in, filled workbook bytes out

use crate::config::ExportConfig;
use crate::error::{SiteSplitError, SiteSplitResult};
use crate::grid::select_sheet;
use crate::types::{CellMapping, Payload};
use crate::writer::{ValueWriter, WriteReport};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::{debug, info, warn};

pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const DEFAULT_SHIFT: &str = "Day";

/// Inbound export request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub rows: Payload,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl ExportRequest {
    pub fn new(rows: Payload) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Shift name, `Day` when missing or blank
    pub fn shift(&self) -> &str {
        self.shift
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SHIFT)
    }

    /// Report date, today (local, `YYYY-MM-DD`) when missing or blank
    pub fn date(&self) -> String {
        self.date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
    }

    /// Suggested download name. Path separators, quotes and control
    /// characters in the shift and date become `_`, so the name is always a
    /// single path component and a valid header parameter.
    pub fn filename(&self) -> String {
        format!(
            "Attendance_report_{}_{}.xlsx",
            filename_part(&self.date()),
            filename_part(self.shift())
        )
    }
}

fn filename_part(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    // A part made only of dots would read as `.` / `..` once split off
    if cleaned.chars().all(|c| c == '.') {
        cleaned.replace('.', "_")
    } else {
        cleaned
    }
}

/// A filled workbook ready to hand back to the caller
#[derive(Debug, Clone)]
pub struct ExportedWorkbook {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mapping: CellMapping,
    pub report: WriteReport,
}

impl ExportedWorkbook {
    pub fn mime_type(&self) -> &'static str {
        XLSX_MIME_TYPE
    }
}

/// How a payload lines up with the mapping; informational only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayloadDiagnostics {
    /// Payload labels the mapping does not know
    pub unexpected_labels: Vec<String>,
    /// `(payload key, mapped label)` pairs that only match after
    /// normalization; those values are not written
    pub near_misses: Vec<(String, String)>,
    /// Mapped labels the payload did not send
    pub missing_labels: Vec<String>,
    /// `label / department / role` slots of sent labels that are absent
    pub missing_roles: Vec<String>,
}

impl PayloadDiagnostics {
    pub fn check(mapping: &CellMapping, payload: &Payload) -> Self {
        let mut diagnostics = Self::default();

        for (label, departments) in mapping.iter() {
            if !payload.contains_label(label) {
                if let Some(near) = payload.near_key(label) {
                    diagnostics
                        .near_misses
                        .push((near.to_string(), label.to_string()));
                }
                diagnostics.missing_labels.push(label.to_string());
                continue;
            }

            for (department, cells) in departments {
                let dept_payload = payload.department(label, *department);
                for (sub, _) in cells.cells() {
                    if !dept_payload.is_some_and(|d| d.contains_key(sub.key())) {
                        diagnostics
                            .missing_roles
                            .push(format!("{} / {} / {}", label.trim(), department, sub));
                    }
                }
            }
        }

        diagnostics.unexpected_labels = payload
            .labels()
            .filter(|key| !mapping.contains_label(key))
            .map(str::to_string)
            .collect();
        diagnostics.unexpected_labels.sort();
        diagnostics.missing_labels.sort();

        diagnostics
    }

    pub fn is_clean(&self) -> bool {
        self.unexpected_labels.is_empty()
            && self.missing_labels.is_empty()
            && self.missing_roles.is_empty()
    }

    fn log(&self) {
        if !self.unexpected_labels.is_empty() || !self.missing_labels.is_empty() {
            warn!(
                unexpected = ?self.unexpected_labels,
                missing = ?self.missing_labels,
                "payload labels differ from the template mapping"
            );
        }
        for (key, label) in &self.near_misses {
            warn!(
                key = key.as_str(),
                label = label.as_str(),
                "payload key differs from a template label only in spacing or case; did you mean the label?"
            );
        }
        for slot in &self.missing_roles {
            debug!(slot = slot.as_str(), "payload has no value for mapped cell");
        }
    }
}

/// Loads the template, resolves, writes and serializes one request
#[derive(Debug, Clone, Default)]
pub struct SiteSplitExporter {
    config: ExportConfig,
}

impl SiteSplitExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn template_exists(&self) -> bool {
        self.config.template_path.is_file()
    }

    pub fn export(&self, request: &ExportRequest) -> SiteSplitResult<ExportedWorkbook> {
        let template_path = &self.config.template_path;
        if !self.template_exists() {
            return Err(SiteSplitError::TemplateNotFound(template_path.clone()));
        }

        let mut book = umya_spreadsheet::reader::xlsx::read(template_path).map_err(|e| {
            SiteSplitError::Spreadsheet(format!(
                "Failed to read template {}: {}",
                template_path.display(),
                e
            ))
        })?;

        let resolver = self.config.build_resolver()?;
        let (mapping, report) = {
            let sheet = select_sheet(&mut book, self.config.sheet.as_deref())?;
            let mapping = resolver.resolve(&*sheet);
            info!(
                resolver = resolver.name(),
                sheet = sheet.get_name(),
                labels = mapping.len(),
                cells = mapping.cell_count(),
                "template mapping resolved"
            );

            PayloadDiagnostics::check(&mapping, &request.rows).log();

            let writer = ValueWriter::new(self.config.writer.clone());
            let report = writer.write(sheet, &mapping, &request.rows);
            (mapping, report)
        };

        let mut buffer = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer).map_err(|e| {
            SiteSplitError::Spreadsheet(format!("Failed to serialize workbook: {}", e))
        })?;

        Ok(ExportedWorkbook {
            bytes: buffer.into_inner(),
            filename: request.filename(),
            mapping,
            report,
        })
    }
}
