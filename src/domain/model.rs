use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One journal in the generated list. Field order is the JSON key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub title: String,
    pub rating: String,
    pub issn: String,
    pub issn_online: String,
    pub publisher: String,
    pub for_code: String,
    pub year: String,
}

/// Worksheet row keyed by zero-based column index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    cells: BTreeMap<u32, String>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: u32, value: String) {
        self.cells.insert(column, value);
    }

    pub fn get(&self, column: u32) -> Option<&str> {
        self.cells.get(&column).map(String::as_str)
    }

    /// Cells in ascending column order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.cells.iter().map(|(col, value)| (*col, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<const N: usize> From<[(u32, &str); N]> for SheetRow {
    fn from(cells: [(u32, &str); N]) -> Self {
        Self {
            cells: cells
                .into_iter()
                .map(|(col, value)| (col, value.to_string()))
                .collect(),
        }
    }
}

/// Entry of the hand-maintained legacy file. Values may be any JSON scalar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyEntry {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub rank: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<JournalRecord>,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputProfile {
    /// title, rating, issn, issn_online, publisher, for_code, year
    #[default]
    Full,
    /// name, rating
    Simple,
}

impl fmt::Display for OutputProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputProfile::Full => write!(f, "full"),
            OutputProfile::Simple => write!(f, "simple"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Workbook,
    LegacyJson,
}

#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub output_path: String,
    pub record_count: usize,
    pub written: bool,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub source: SourceKind,
    pub source_path: String,
    pub output_path: String,
    pub record_count: usize,
    pub used_fallback: bool,
    pub written: bool,
}
