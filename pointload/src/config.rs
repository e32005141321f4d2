//! Run configuration.
//!
//! [`LoadOptions`] is everything a run needs. The CLI fills it from
//! arguments and the environment (`.env` is honored); library callers
//! build it directly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mapping::HeaderCollision;

/// Environment variable holding the input file path.
pub const FILE_ENV_VAR: &str = "POINTLOAD_FILE";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Options for one load run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadOptions {
    /// Spreadsheet or delimited file to read.
    pub path: PathBuf,

    /// Only these sheets, in workbook order. Empty means all sheets.
    pub sheets: Vec<String>,

    /// Which column wins when a header label repeats.
    pub header_collision: HeaderCollision,

    /// Reject rows whose point code or sampling frequency column is absent
    /// instead of leaving the field at its default.
    pub require_key_fields: bool,
}

impl LoadOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_sheets<I, S>(mut self, sheets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheets = sheets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_header_collision(mut self, policy: HeaderCollision) -> Self {
        self.header_collision = policy;
        self
    }

    pub fn with_required_key_fields(mut self, required: bool) -> Self {
        self.require_key_fields = required;
        self
    }

    /// Whether a sheet passes the sheet filter.
    pub fn includes_sheet(&self, name: &str) -> bool {
        self.sheets.is_empty() || self.sheets.iter().any(|s| s == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_tolerant() {
        let options = LoadOptions::new("points.xlsx");
        assert_eq!(options.path, PathBuf::from("points.xlsx"));
        assert_eq!(options.header_collision, HeaderCollision::LastWins);
        assert!(!options.require_key_fields);
        assert!(options.includes_sheet("anything"));
    }

    #[test]
    fn test_sheet_filter() {
        let options = LoadOptions::new("points.xlsx").with_sheets(["Line A"]);
        assert!(options.includes_sheet("Line A"));
        assert!(!options.includes_sheet("Line B"));
    }

    #[test]
    fn test_deserialize_partial_options() {
        let options: LoadOptions = serde_json::from_str(
            r#"{ "path": "p.xlsx", "headerCollision": "first-wins" }"#,
        )
        .unwrap();
        assert_eq!(options.header_collision, HeaderCollision::FirstWins);
        assert!(options.sheets.is_empty());
    }
}
