use std::path::PathBuf;

use serde::Serialize;

/// What a single substitution rule did to its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Region replaced with new text.
    Updated,
    /// Region already held the fragment.
    Unchanged,
    /// Markdown had no value for the field; document untouched.
    NoFragment,
    /// No element in the document matched the anchor; document untouched.
    AnchorMissing,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub field: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub changed: bool,
    pub fields: Vec<FieldReport>,
}

impl DocumentReport {
    #[cfg(test)]
    pub fn outcome(&self, field: &str) -> Option<Outcome> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.outcome)
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.fields.iter().filter(|f| f.outcome == outcome).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub grammar_version: u32,
    pub dry_run: bool,
    pub documents: Vec<DocumentReport>,
}

impl SyncReport {
    /// Number of fields replaced across both documents.
    pub fn updated(&self) -> usize {
        self.documents
            .iter()
            .map(|d| d.count(Outcome::Updated))
            .sum()
    }
}
