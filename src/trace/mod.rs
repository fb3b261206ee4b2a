//! Execution traces
//!
//! A [`Trace`] is the ordered list of [`TraceEntry`] snapshots recorded while a
//! generator runs an algorithm. Every entry owns a full copy of the variables
//! it shows, so nothing the generator does afterwards can reach back into an
//! entry already recorded. Once a [`TraceRecorder`] is finished the trace has
//! no mutators left.

pub mod value;

use crate::error::GenerateError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use value::Value;

/// Variable name -> value at one step
pub type Variables = BTreeMap<String, Value>;

/// Variable name -> annotations at one step
pub type Highlights = FxHashMap<String, Vec<Highlight>>;

/// Default cap on entries per trace
pub const DEFAULT_TRACE_LIMIT: usize = 100_000;

/// Semantic role of a highlight. Renderers pick the color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Currently being examined
    Current,
    /// An update just committed
    Resolved,
    /// A condition fired (found, matched)
    Violation,
    /// A secondary index or dependency
    Reference,
}

/// Element a highlight points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Index(usize),
    Cell { row: usize, col: usize },
    /// An entry of a map variable, by key
    Key(i64),
}

impl Target {
    /// Positional indices: `[i]`, `[row, col]`, or none for a map key
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Target::Index(i) => vec![i],
            Target::Cell { row, col } => vec![row, col],
            Target::Key(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Index(i) => write!(f, "[{}]", i),
            Target::Cell { row, col } => write!(f, "[{},{}]", row, col),
            Target::Key(key) => write!(f, "{{{}}}", key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub target: Target,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Highlight {
    pub fn index(index: usize, role: Role) -> Self {
        Highlight {
            target: Target::Index(index),
            role,
            label: None,
        }
    }

    pub fn cell(row: usize, col: usize, role: Role) -> Self {
        Highlight {
            target: Target::Cell { row, col },
            role,
            label: None,
        }
    }

    pub fn key(key: i64, role: Role) -> Self {
        Highlight {
            target: Target::Key(key),
            role,
            label: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One immutable snapshot of an algorithm's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Position in the trace, starting at 0
    pub id: usize,
    /// 1-based line of the listing; 0 means no active line
    pub line: usize,
    pub description: String,
    pub variables: Variables,
    pub highlights: Highlights,
}

impl TraceEntry {
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Highlights for a variable; empty when the key is absent
    pub fn highlights_for(&self, name: &str) -> &[Highlight] {
        self.highlights.get(name).map_or(&[], Vec::as_slice)
    }
}

/// A finished, read-only sequence of trace entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// The trace shown when inputs are incompatible or generation failed
    pub fn empty() -> Self {
        Trace::default()
    }

    pub fn get(&self, index: usize) -> Option<&TraceEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Collects entries while a generator runs
#[derive(Debug)]
pub struct TraceRecorder {
    entries: Vec<TraceEntry>,
    max_entries: usize,
}

impl TraceRecorder {
    pub fn new(max_entries: usize) -> Self {
        TraceRecorder {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Append a snapshot. The id is the next position in the trace.
    pub fn record(
        &mut self,
        line: usize,
        description: impl Into<String>,
        variables: Variables,
        highlights: Highlights,
    ) -> Result<(), GenerateError> {
        if self.entries.len() >= self.max_entries {
            return Err(GenerateError::TraceLimitExceeded {
                limit: self.max_entries,
            });
        }

        self.entries.push(TraceEntry {
            id: self.entries.len(),
            line,
            description: description.into(),
            variables,
            highlights,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.max_entries
    }

    pub fn finish(self) -> Trace {
        Trace {
            entries: self.entries,
        }
    }
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_LIMIT)
    }
}

/// Small builder for a step's highlight map
#[derive(Debug, Default)]
pub struct Marks {
    highlights: Highlights,
}

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(mut self, variable: &str, highlight: Highlight) -> Self {
        self.highlights
            .entry(variable.to_string())
            .or_default()
            .push(highlight);
        self
    }

    /// Mark only when `index` is present
    pub fn mark_opt(self, variable: &str, index: Option<usize>, role: Role, label: &str) -> Self {
        match index {
            Some(i) => self.mark(variable, Highlight::index(i, role).labeled(label)),
            None => self,
        }
    }

    pub fn build(self) -> Highlights {
        self.highlights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(n: i64) -> Variables {
        let mut variables = Variables::new();
        variables.insert("n".to_string(), Value::Number(n));
        variables
    }

    #[test]
    fn test_recorder_assigns_sequential_ids() {
        let mut recorder = TraceRecorder::new(10);
        for n in 0..3 {
            recorder.record(1, "step", vars(n), Highlights::default()).unwrap();
        }
        let trace = recorder.finish();
        let ids: Vec<usize> = trace.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_recorder_limit() {
        let mut recorder = TraceRecorder::new(1);
        recorder.record(1, "first", vars(0), Highlights::default()).unwrap();
        let err = recorder
            .record(1, "second", vars(1), Highlights::default())
            .unwrap_err();
        assert_eq!(err, GenerateError::TraceLimitExceeded { limit: 1 });
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_marks_group_by_variable() {
        let highlights = Marks::new()
            .mark("nums", Highlight::index(0, Role::Current).labeled("i"))
            .mark("nums", Highlight::index(1, Role::Violation))
            .mark_opt("grid", None, Role::Current, "x")
            .build();
        assert_eq!(highlights["nums"].len(), 2);
        assert_eq!(highlights["nums"][0].label.as_deref(), Some("i"));
        assert!(!highlights.contains_key("grid"));
    }

    #[test]
    fn test_highlights_for_absent_key_is_empty() {
        let mut recorder = TraceRecorder::default();
        recorder.record(0, "only", vars(1), Highlights::default()).unwrap();
        let trace = recorder.finish();
        assert!(trace.get(0).unwrap().highlights_for("missing").is_empty());
        assert_eq!(Target::Cell { row: 1, col: 2 }.indices(), vec![1, 2]);
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Index(3).to_string(), "[3]");
        assert_eq!(Target::Cell { row: 1, col: 2 }.to_string(), "[1,2]");
        assert_eq!(Target::Key(-7).to_string(), "{-7}");
        assert!(Highlight::key(2, Role::Violation).target.indices().is_empty());
    }
}
