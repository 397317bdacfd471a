pub mod json;
pub mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use serde::Serialize;

/// What happened to one stored record during a migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// A legacy shape was upgraded
    Migrated,
    /// Values were normalised without a schema migration
    Normalized,
    /// Already canonical
    Unchanged,
    /// Could not be migrated; left untouched
    Failed,
}

/// Migration outcome of one record file
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub file: String,
    pub id: Option<String>,
    pub kind: OutcomeKind,
    pub notes: Vec<String>,
    pub error: Option<String>,
    /// Whether the migrated record was written back to disk
    pub written: bool,
}

impl RecordOutcome {
    pub fn count(outcomes: &[RecordOutcome], kind: OutcomeKind) -> usize {
        outcomes.iter().filter(|o| o.kind == kind).count()
    }
}
