use super::CellResolver;
use crate::config::ResolverConfig;
use crate::grid::Grid;
use crate::normalize::{normalize_with, tokens};
use crate::types::{CellMapping, CellRef, Department, DeptCells, SubCategory};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Column number per (department, sub-category), in discovery order
pub type ColumnTargets = IndexMap<(Department, SubCategory), u32>;

/// Everything a header scan found, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderScan {
    pub anchor_row: u32,
    pub columns: ColumnTargets,
    /// Row of every label that was found, in label order
    pub label_rows: IndexMap<String, u32>,
    pub mapping: CellMapping,
}

/// Locates target cells by matching header tokens over a multi-row band.
///
/// The band starts at the row whose column-1 text is the sentinel. A column
/// belongs to (department, sub-category) when its band tokens contain both the
/// department token and the sub-category token, so `INBOUND AMZN`,
/// `AMZN - Inbound` and a two-row `Inbound` / `AMZN` header all match. The
/// leftmost matching column wins.
pub struct HeaderScanResolver {
    config: ResolverConfig,
    sentinel: String,
    excluded: Vec<String>,
    departments: Vec<(Department, Vec<String>)>,
}

impl HeaderScanResolver {
    pub fn new(config: ResolverConfig) -> Self {
        let sentinel = normalize_with(&config.sentinel, config.folds());
        let excluded = config
            .excluded_tokens
            .iter()
            .map(|t| normalize_with(t, config.folds()))
            .collect();
        let departments = config
            .departments
            .iter()
            .map(|d| {
                let toks = d
                    .tokens
                    .iter()
                    .map(|t| normalize_with(t, config.folds()))
                    .collect();
                (d.department, toks)
            })
            .collect();

        Self {
            config,
            sentinel,
            excluded,
            departments,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn normalized(&self, text: &str) -> String {
        normalize_with(text, self.config.folds())
    }

    /// Row holding the sentinel within the first `anchor_scan_rows` rows of
    /// column 1, else the configured default
    pub fn find_anchor_row(&self, grid: &dyn Grid) -> u32 {
        let limit = grid.last_row().min(self.config.anchor_scan_rows);
        (1..=limit)
            .find(|&row| {
                grid.label_text(row, 1)
                    .is_some_and(|text| self.normalized(&text) == self.sentinel)
            })
            .unwrap_or(self.config.default_anchor_row)
    }

    /// Assign each (department, sub-category) its leftmost matching column
    pub fn column_targets(&self, grid: &dyn Grid, anchor_row: u32) -> ColumnTargets {
        let mut targets = ColumnTargets::new();
        let band = anchor_row..anchor_row + self.config.header_band_rows;

        for column in 2..=grid.last_column() {
            let header: HashSet<String> = band
                .clone()
                .filter_map(|row| grid.label_text(row, column))
                .flat_map(|text| tokens(&text, self.config.folds()))
                .collect();

            if header.is_empty() {
                continue;
            }
            if self.excluded.iter().any(|t| header.contains(t)) {
                continue;
            }

            // Canonical token before synonyms; a slot filled by an earlier
            // column is never replaced.
            for (department, dept_tokens) in &self.departments {
                for dept_token in dept_tokens {
                    if !header.contains(dept_token) {
                        continue;
                    }
                    for sub in SubCategory::ALL {
                        if header.contains(sub.key()) {
                            targets.entry((*department, sub)).or_insert(column);
                        }
                    }
                }
            }
        }

        targets
    }

    /// First row whose column-1 text equals `label` after normalization
    pub fn find_label_row(&self, grid: &dyn Grid, label: &str) -> Option<u32> {
        let wanted = self.normalized(label);
        (1..=grid.last_row()).find(|&row| {
            grid.label_text(row, 1)
                .is_some_and(|text| self.normalized(&text) == wanted)
        })
    }

    /// Full scan with intermediate results
    pub fn scan(&self, grid: &dyn Grid) -> HeaderScan {
        let anchor_row = self.find_anchor_row(grid);
        let columns = self.column_targets(grid, anchor_row);
        debug!(anchor_row, columns = columns.len(), "header band scanned");

        let mut label_rows = IndexMap::new();
        let mut mapping = CellMapping::new();

        for label in &self.config.labels {
            let Some(row) = self.find_label_row(grid, label) else {
                debug!(label = label.as_str(), "label not found in column 1");
                continue;
            };
            label_rows.insert(label.clone(), row);

            let mut per_dept = IndexMap::new();
            for (department, _) in &self.departments {
                let amzn = columns.get(&(*department, SubCategory::Amzn));
                let temp = columns.get(&(*department, SubCategory::Temp));
                if let (Some(&amzn), Some(&temp)) = (amzn, temp) {
                    per_dept.insert(
                        *department,
                        DeptCells {
                            amzn: CellRef::new(row, amzn),
                            temp: CellRef::new(row, temp),
                        },
                    );
                }
            }

            if !per_dept.is_empty() {
                mapping.insert(label.clone(), per_dept);
            }
        }

        HeaderScan {
            anchor_row,
            columns,
            label_rows,
            mapping,
        }
    }
}

impl Default for HeaderScanResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl CellResolver for HeaderScanResolver {
    fn name(&self) -> &'static str {
        "header_scan"
    }

    fn resolve(&self, grid: &dyn Grid) -> CellMapping {
        self.scan(grid).mapping
    }
}
