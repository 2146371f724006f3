use std::fmt;
use std::path::PathBuf;

use log::{info, warn};

use crate::config::Target;
use crate::updater::{UpdateOutcome, Updater, WriteMode};

#[derive(Debug)]
pub struct TargetReport {
    pub path: PathBuf,
    pub active_page: String,
    pub outcome: UpdateOutcome,
}

impl TargetReport {
    /// Console line for this page, worded for the updater's write mode.
    pub fn status_line(&self, mode: WriteMode) -> String {
        let path = self.path.display();
        match (&self.outcome, mode) {
            (UpdateOutcome::Changed, WriteMode::Apply) => format!("✅ Updated: {path}"),
            (UpdateOutcome::Changed, WriteMode::Check) => format!("📝 Would update: {path}"),
            (UpdateOutcome::Unchanged, _) => format!("⚠️  No changes: {path}"),
            (UpdateOutcome::Failed(err), _) => format!("❌ Error updating {path}: {err}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<TargetReport>,
}

impl BatchSummary {
    pub fn changed(&self) -> usize {
        self.count(|outcome| matches!(outcome, UpdateOutcome::Changed))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|outcome| matches!(outcome, UpdateOutcome::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(UpdateOutcome::is_failed)
    }

    fn count(&self, pred: impl Fn(&UpdateOutcome) -> bool) -> usize {
        self.reports
            .iter()
            .filter(|report| pred(&report.outcome))
            .count()
    }

    /// A batch succeeds when nothing failed; in check mode every page must
    /// also already be in sync.
    pub fn is_success(&self, mode: WriteMode) -> bool {
        match mode {
            WriteMode::Apply => self.failed() == 0,
            WriteMode::Check => self.failed() == 0 && self.changed() == 0,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed, {} unchanged, {} failed",
            self.changed(),
            self.unchanged(),
            self.failed()
        )
    }
}

/// Updates every target in order. A failing page is reported and the rest
/// are still processed.
pub fn sync_all(updater: &Updater, targets: &[Target]) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for target in targets {
        let outcome = updater.update(&target.path, &target.active_page);
        let report = TargetReport {
            path: target.path.clone(),
            active_page: target.active_page.clone(),
            outcome,
        };
        if let UpdateOutcome::Failed(err) = &report.outcome {
            warn!("{} ({}) failed: {err}", report.path.display(), report.active_page);
        } else {
            info!("{} ({}) processed", report.path.display(), report.active_page);
        }
        println!("{}", report.status_line(updater.mode()));
        summary.reports.push(report);
    }
    summary
}
