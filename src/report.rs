//! Sorted tally report and JSON serialization.

use std::fs;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::tally::AuthorTally;

/// Authors ordered by comment count descending; equal counts keep the
/// order the authors were first seen in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyReport {
    rows: Vec<(String, u64)>,
}

impl TallyReport {
    pub fn from_tally(tally: AuthorTally) -> Self {
        Self {
            rows: tally.into_sorted(),
        }
    }

    pub fn rows(&self) -> &[(String, u64)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows (fewer when the report is shorter).
    pub fn top(&self, n: usize) -> &[(String, u64)] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Render as a JSON object (author → count), keys in rank order,
    /// 4-space indentation, non-ASCII left unescaped.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf)
            .map_err(|e| Error::SerializationError(format!("Report is not UTF-8: {}", e)))
    }

    /// Write the JSON report to `path`, overwriting any existing file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Serialize for TallyReport {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // serialize_map keeps entry order, so the JSON object preserves
        // the count-descending ranking.
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (author, count) in &self.rows {
            map.serialize_entry(author, count)?;
        }
        map.end()
    }
}
