//! Terminal badge rendering, colored with the `console` crate.

use console::Style;

use crate::reconcile::{Presenter, ScoreCategory};

/// Renders score badges as colored terminal lines.
///
/// The terminal is always present, so `render` never reports a
/// missing mount point and nothing is ever stashed behind it.
pub struct ConsolePresenter {
    good: Style,
    warn: Style,
    bad: Style,
    error: Style,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            good: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            bad: Style::new().red().bold(),
            error: Style::new().dim(),
        }
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for ConsolePresenter {
    fn render(&self, row: &str, text: &str, category: ScoreCategory, tooltip: &str) -> bool {
        let style = match category {
            ScoreCategory::Good => &self.good,
            ScoreCategory::Warn => &self.warn,
            ScoreCategory::Bad => &self.bad,
            ScoreCategory::Error => &self.error,
        };
        if tooltip.is_empty() {
            println!("  {} {}", style.apply_to(text), row);
        } else {
            println!("  {} {} ({tooltip})", style.apply_to(text), row);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_always_has_a_mount_point() {
        let presenter = ConsolePresenter::new();
        assert!(presenter.render("r1", "✅ 85", ScoreCategory::Good, ""));
        assert!(presenter.render("r2", "⚠️ ERR", ScoreCategory::Error, "failed"));
    }
}
