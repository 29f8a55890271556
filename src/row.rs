//! Per-row scoring state, keyed by row identifier.
//!
//! The ledger is the single owner of row lifecycle flags, an explicit
//! tagged state instead of ambient per-element attributes: a row is
//! unscored, holds a stashed result awaiting display, or carries a
//! rendered badge and is done.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::transport::ScoreResult;

/// What the presentation surface knows about a row's score.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RenderState {
    /// No result yet.
    #[default]
    Unscored,
    /// A result arrived while the row's mount point was absent; kept
    /// for replay once the row's subtree renders again.
    Stashed(ScoreResult),
    /// A badge (score or terminal error) is displayed. Terminal: the
    /// row is never admitted again.
    Rendered,
}

/// Lifecycle flags for one row.
#[derive(Debug, Clone, Default)]
pub struct RowState {
    /// Set while a work item for this row is queued or in flight.
    pub in_flight: bool,
    pub render: RenderState,
}

/// Owns the state of every row the pipeline has seen.
///
/// State lives for the lifetime of the owning queue; tearing down and
/// rebuilding the pipeline starts from a clean ledger. The map sits
/// behind a mutex that is never held across an await point.
#[derive(Debug, Default)]
pub struct RowLedger {
    rows: Mutex<HashMap<String, RowState>>,
}

impl RowLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admission gate: returns `true` and marks the row in flight iff
    /// it is neither already in flight nor terminally rendered. Check
    /// and mark happen in one lock scope, so redundant discovery
    /// events cannot race a second work item in.
    pub fn try_begin(&self, row: &str) -> bool {
        let mut rows = self.rows.lock().expect("row ledger poisoned");
        let state = rows.entry(row.to_string()).or_default();
        if state.in_flight || state.render == RenderState::Rendered {
            return false;
        }
        state.in_flight = true;
        true
    }

    /// Clears the in-flight mark once the row's work item completes.
    pub fn finish(&self, row: &str) {
        let mut rows = self.rows.lock().expect("row ledger poisoned");
        if let Some(state) = rows.get_mut(row) {
            state.in_flight = false;
        }
    }

    /// Marks the row terminally rendered, dropping any stash.
    pub fn mark_rendered(&self, row: &str) {
        let mut rows = self.rows.lock().expect("row ledger poisoned");
        rows.entry(row.to_string()).or_default().render = RenderState::Rendered;
    }

    /// Stashes a computed result for later replay. No-op once the row
    /// has rendered.
    pub fn stash(&self, row: &str, result: ScoreResult) {
        let mut rows = self.rows.lock().expect("row ledger poisoned");
        let state = rows.entry(row.to_string()).or_default();
        if state.render != RenderState::Rendered {
            state.render = RenderState::Stashed(result);
        }
    }

    /// The stashed result for `row`, if one is pending display.
    pub fn stashed(&self, row: &str) -> Option<ScoreResult> {
        let rows = self.rows.lock().expect("row ledger poisoned");
        match rows.get(row).map(|state| &state.render) {
            Some(RenderState::Stashed(result)) => Some(result.clone()),
            _ => None,
        }
    }

    /// Snapshot of a row's state, if the row has been seen.
    pub fn state(&self, row: &str) -> Option<RowState> {
        self.rows.lock().expect("row ledger poisoned").get(row).cloned()
    }
}
