use std::path::PathBuf;
use thiserror::Error;

pub type SiteSplitResult<T> = Result<T, SiteSplitError>;

#[derive(Error, Debug)]
pub enum SiteSplitError {
    #[error("Template not found at {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SiteSplitError {
    /// True when the caller should answer with a "not found" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, SiteSplitError::TemplateNotFound(_))
    }
}
