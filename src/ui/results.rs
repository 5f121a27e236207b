//! The result list: one collapsible row per submitted expression.

use crate::model::EvalOutcome;

/// One rendered outcome.
///
/// The expression stored here is the raw text as the user typed it,
/// captured when its request was submitted.  Overlapping submissions each
/// keep their own copy, so a row can never show another request's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub header: String,
    pub badge: bool,
    pub expression: String,
    pub expanded: bool,
}

impl ResultRow {
    pub fn new(outcome: EvalOutcome, expression: String) -> Self {
        let (header, badge) = match outcome {
            EvalOutcome::Value(value) => (value, false),
            EvalOutcome::CompileError(msg) => (format!("Compiler Error: {msg}"), true),
            EvalOutcome::RuntimeError(msg) => (format!("Runtime Error: {msg}"), true),
            EvalOutcome::TransportError(msg) => (format!("Network Error: {msg}"), true),
        };
        ResultRow {
            header,
            badge,
            expression,
            expanded: false,
        }
    }
}

/// Ordered result rows below a fixed header line.
///
/// The header is stored apart from the rows, so clearing the list can only
/// ever remove generated rows.
#[derive(Debug)]
pub struct ResultsList {
    header: String,
    rows: Vec<ResultRow>,
}

impl ResultsList {
    pub fn new(header: impl Into<String>) -> Self {
        ResultsList {
            header: header.into(),
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a row at the top: most recent outcome first.
    pub fn push_front(&mut self, row: ResultRow) {
        self.rows.insert(0, row);
    }

    pub fn toggle_expanded(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.expanded = !row.expanded;
        }
    }

    /// Remove every generated row, leaving only the fixed header.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
