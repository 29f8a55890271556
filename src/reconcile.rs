//! Applies scoring results back onto rows.
//!
//! By the time a verdict arrives the row's mount point may have been
//! re-rendered away. Successful results are then stashed on the row
//! ledger and replayed when the surface comes back; terminal failures
//! are rendered immediately and never stashed.

use std::sync::Arc;

use tracing::debug;

use crate::row::RowLedger;
use crate::transport::ScoreResult;

/// Badge taxonomy derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCategory {
    /// score >= 60
    Good,
    /// 30 <= score < 60
    Warn,
    /// score < 30
    Bad,
    /// Terminal failure, no score available.
    Error,
}

impl ScoreCategory {
    pub fn for_score(score: f64) -> Self {
        if score >= 60.0 {
            ScoreCategory::Good
        } else if score >= 30.0 {
            ScoreCategory::Warn
        } else {
            ScoreCategory::Bad
        }
    }

    /// Badge glyph prefixed to the score text.
    pub fn glyph(self) -> &'static str {
        match self {
            ScoreCategory::Good => "✅",
            ScoreCategory::Warn => "⚠️",
            ScoreCategory::Bad => "❗",
            ScoreCategory::Error => "⚠️",
        }
    }
}

/// Renders one badge into a row's mount point.
///
/// Returns `true` iff a mount point existed and was updated. A
/// `false` from a score render makes the reconciler stash the result
/// for replay; a `false` from a terminal-error render is a lost
/// notification and is accepted as such.
pub trait Presenter: Send + Sync {
    fn render(&self, row: &str, text: &str, category: ScoreCategory, tooltip: &str) -> bool;
}

/// Owns the result half of the pipeline: render, stash, replay.
pub struct Reconciler {
    ledger: Arc<RowLedger>,
    presenter: Arc<dyn Presenter>,
}

impl Reconciler {
    pub fn new(ledger: Arc<RowLedger>, presenter: Arc<dyn Presenter>) -> Self {
        Self { ledger, presenter }
    }

    fn render_score(&self, row: &str, result: &ScoreResult) -> bool {
        let category = ScoreCategory::for_score(result.score);
        let text = format!("{} {}", category.glyph(), result.score);
        self.presenter
            .render(row, &text, category, result.reason.as_deref().unwrap_or(""))
    }

    /// Applies a successful result. If the mount point is absent the
    /// result is stashed and the row stays non-terminal so a later
    /// [`try_replay`](Self::try_replay) can finish the job without
    /// redoing network work.
    pub fn apply(&self, row: &str, result: ScoreResult) {
        if self.render_score(row, &result) {
            self.ledger.mark_rendered(row);
        } else {
            debug!(row, "mount point absent, stashing result");
            self.ledger.stash(row, result);
        }
    }

    /// Applies a terminal failure. Rendered immediately and the row is
    /// marked terminal even when the mount point is gone: a lost error
    /// badge must not keep the row in limbo.
    pub fn apply_terminal(&self, row: &str, reason: &str) {
        let _ = self
            .presenter
            .render(row, "⚠️ ERR", ScoreCategory::Error, reason);
        self.ledger.mark_rendered(row);
    }

    /// Replays a stashed result, typically on a "mount point became
    /// available again" event. Idempotent: no stash, or a row that has
    /// already rendered, is a no-op.
    pub fn try_replay(&self, row: &str) {
        let Some(result) = self.ledger.stashed(row) else {
            return;
        };
        if self.render_score(row, &result) {
            debug!(row, "stashed result replayed");
            self.ledger.mark_rendered(row);
        }
    }
}
