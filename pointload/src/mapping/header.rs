//! Header row → column index lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which column a label resolves to when it appears more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderCollision {
    /// The right-most column with the label wins.
    #[default]
    LastWins,
    /// The left-most column with the label wins.
    FirstWins,
}

/// Trimmed header label → zero-based column position.
///
/// Blank header cells are not indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl HeaderIndex {
    /// Build the index for one header row.
    ///
    /// # Example
    /// ```
    /// use pointload::mapping::{HeaderCollision, HeaderIndex};
    ///
    /// let header = vec!["序号".to_string(), " 点位编号 ".to_string(), "序号".to_string()];
    /// let index = HeaderIndex::build(&header, HeaderCollision::LastWins);
    ///
    /// assert_eq!(index.get("点位编号"), Some(1));
    /// assert_eq!(index.get("序号"), Some(2));
    /// assert_eq!(index.duplicates(), ["序号".to_string()]);
    /// ```
    pub fn build(header: &[String], policy: HeaderCollision) -> Self {
        let mut index = Self::default();

        for (position, raw) in header.iter().enumerate() {
            let label = raw.trim();
            if label.is_empty() {
                continue;
            }

            if index.columns.contains_key(label) {
                if !index.duplicates.iter().any(|d| d == label) {
                    index.duplicates.push(label.to_string());
                }
                if policy == HeaderCollision::FirstWins {
                    continue;
                }
            }
            index.columns.insert(label.to_string(), position);
        }

        index
    }

    /// Column position for a label, if the header has it.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.columns.get(label).copied()
    }

    /// Labels that appeared in more than one column, in first-seen order.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
