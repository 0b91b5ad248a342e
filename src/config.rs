//! Export configuration
//!
//! Every table the resolver and writer consult (labels, departments, header
//! tokens) lives here as plain data, so resolution is a function of
//! (template, configuration) only. All fields default to the canonical Site
//! Split layout; a YAML file only needs the keys it overrides.

use crate::error::{SiteSplitError, SiteSplitResult};
use crate::resolver::{CellResolver, HeaderScanResolver, StaticTableResolver};
use crate::types::{CellMapping, Department};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Row labels in template order
pub const DEFAULT_LABELS: [&str; 10] = [
    "Regular HC (Cohort Expected)",
    "Regular HC Present (Excluding Swaps)",
    "Shift Swap Out ",
    "Shift Swap Expected",
    "Shift Swap Present ",
    "VTO",
    "VET Accepted",
    "VET Present",
    "MET Expected",
    "MET Present",
];

/// Rows that always export as zero
pub const DEFAULT_FORCED_ZERO_LABELS: [&str; 2] = ["MET Expected", "MET Present"];

pub const DEFAULT_TEMPLATE_PATH: &str = "assets/Site_Split.xlsx";

/// Header tokens that identify one department.
///
/// The first token is canonical; later ones are synonyms tried only for slots
/// no earlier column has filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTokens {
    pub department: Department,
    pub tokens: Vec<String>,
}

impl DepartmentTokens {
    pub fn new(department: Department, tokens: &[&str]) -> Self {
        Self {
            department,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A `from → to` replacement applied after normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFold {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Column-1 text marking the top of the header band
    pub sentinel: String,
    /// How many rows of column 1 are searched for the sentinel
    pub anchor_scan_rows: u32,
    /// Anchor used when the sentinel is missing
    pub default_anchor_row: u32,
    /// Height of the header band starting at the anchor
    pub header_band_rows: u32,
    /// Columns carrying any of these tokens are never targets
    pub excluded_tokens: Vec<String>,
    pub labels: Vec<String>,
    pub departments: Vec<DepartmentTokens>,
    pub token_folds: Vec<TokenFold>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            sentinel: "ATTENDANCE DETAILS".to_string(),
            anchor_scan_rows: 40,
            default_anchor_row: 3,
            header_band_rows: 3,
            excluded_tokens: ["TOTAL", "PERCENT", "PCT"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            labels: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            departments: vec![
                DepartmentTokens::new(Department::Inbound, &["INBOUND"]),
                DepartmentTokens::new(Department::Da, &["DA"]),
                DepartmentTokens::new(Department::Icqa, &["ICQA"]),
                DepartmentTokens::new(Department::Crets, &["CRETS", "IXD"]),
            ],
            token_folds: crate::normalize::DEFAULT_FOLDS
                .iter()
                .map(|(from, to)| TokenFold {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }
}

impl ResolverConfig {
    pub fn folds(&self) -> impl Iterator<Item = (&str, &str)> + Clone {
        self.token_folds
            .iter()
            .map(|f| (f.from.as_str(), f.to.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub forced_zero_labels: Vec<String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            forced_zero_labels: DEFAULT_FORCED_ZERO_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
        }
    }
}

/// Which mapping producer an export uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    #[default]
    HeaderScan,
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub template_path: PathBuf,
    pub resolver: ResolverKind,
    /// JSON table (scanner output) used by the static resolver;
    /// the built-in table applies when unset
    pub static_map: Option<PathBuf>,
    /// Case-insensitive sheet name fragment; the active sheet when unset
    pub sheet: Option<String>,
    pub layout: ResolverConfig,
    pub writer: WriterConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            resolver: ResolverKind::default(),
            static_map: None,
            sheet: None,
            layout: ResolverConfig::default(),
            writer: WriterConfig::default(),
        }
    }
}

impl ExportConfig {
    pub fn from_yaml_str(yaml: &str) -> SiteSplitResult<Self> {
        let config: ExportConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> SiteSplitResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reject layouts the resolver cannot scan
    pub fn validate(&self) -> SiteSplitResult<()> {
        if self.layout.header_band_rows == 0 {
            return Err(SiteSplitError::Config(
                "header_band_rows must be at least 1".to_string(),
            ));
        }
        if self.layout.default_anchor_row == 0 {
            return Err(SiteSplitError::Config(
                "default_anchor_row is 1-based".to_string(),
            ));
        }
        if let Some(dept) = self.layout.departments.iter().find(|d| d.tokens.is_empty()) {
            return Err(SiteSplitError::Config(format!(
                "department {} has no header tokens",
                dept.department
            )));
        }
        Ok(())
    }

    /// Build the configured mapping producer
    pub fn build_resolver(&self) -> SiteSplitResult<Box<dyn CellResolver + Send + Sync>> {
        Ok(match self.resolver {
            ResolverKind::HeaderScan => Box::new(HeaderScanResolver::new(self.layout.clone())),
            ResolverKind::Static => {
                let table = match &self.static_map {
                    Some(path) => CellMapping::from_json_str(&fs::read_to_string(path)?)?,
                    None => StaticTableResolver::builtin_table(),
                };
                Box::new(StaticTableResolver::new(table))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ResolverConfig::default();
        assert_eq!(config.sentinel, "ATTENDANCE DETAILS");
        assert_eq!(config.anchor_scan_rows, 40);
        assert_eq!(config.default_anchor_row, 3);
        assert_eq!(config.header_band_rows, 3);
        assert_eq!(config.labels.len(), 10);
        assert_eq!(config.labels[2], "Shift Swap Out ");
        assert_eq!(config.departments[3].tokens, vec!["CRETS", "IXD"]);
    }

    #[test]
    fn test_yaml_overrides_only_named_keys() {
        let yaml = r#"
template_path: /srv/templates/site.xlsx
resolver: static
writer:
  forced_zero_labels: ["MET Expected"]
"#;
        let config = ExportConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.template_path, PathBuf::from("/srv/templates/site.xlsx"));
        assert_eq!(config.resolver, ResolverKind::Static);
        assert_eq!(config.writer.forced_zero_labels, vec!["MET Expected"]);
        assert_eq!(config.layout, ResolverConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = ExportConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_band() {
        let yaml = "layout:\n  header_band_rows: 0\n";
        let err = ExportConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SiteSplitError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_tokenless_department() {
        let mut config = ExportConfig::default();
        config.layout.departments[0].tokens.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_static_resolver_with_missing_table_file() {
        let config = ExportConfig {
            resolver: ResolverKind::Static,
            static_map: Some(PathBuf::from("/nonexistent/site_split_map.json")),
            ..ExportConfig::default()
        };
        assert!(matches!(config.build_resolver(), Err(SiteSplitError::Io(_))));
    }
}
