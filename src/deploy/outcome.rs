// ABOUTME: Per-run outcome record and the aggregate exit status.
// ABOUTME: One status per step, filled as steps finish, read once for the summary.

use crate::diagnostics::Diagnostics;
use std::collections::BTreeMap;
use std::fmt;

/// Deployment steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Backend,
    Database,
    Health,
    Frontend,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Backend, Step::Database, Step::Health, Step::Frontend];

    /// Key used in the outcome record.
    pub fn key(&self) -> &'static str {
        match self {
            Step::Backend => "backend",
            Step::Database => "supabase",
            Step::Health => "health",
            Step::Frontend => "frontend",
        }
    }

    /// Summary label and the word shown for success and failure.
    fn summary_words(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Step::Backend => ("Backend", "DEPLOYED", "PENDING"),
            Step::Database => ("Supabase", "CONFIGURED", "RETRY"),
            Step::Health => ("Health", "HEALTHY", "WARMING UP"),
            Step::Frontend => ("Frontend", "LIVE", "CHECK"),
        }
    }

    pub fn summary_line(&self, status: StepStatus) -> String {
        let (label, ok, pending) = self.summary_words();
        match status {
            StepStatus::Succeeded => format!("{label}: {ok}"),
            StepStatus::Assumed => format!("{label}: {ok} (assumed)"),
            StepStatus::Failed => format!("{label}: {pending}"),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    /// Counted as success without confirmation (database fallback).
    Assumed,
    Failed,
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, StepStatus::Failed)
    }
}

impl From<bool> for StepStatus {
    fn from(ok: bool) -> Self {
        if ok {
            StepStatus::Succeeded
        } else {
            StepStatus::Failed
        }
    }
}

/// Step outcomes of a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcomes {
    results: BTreeMap<Step, StepStatus>,
}

impl Outcomes {
    pub fn record(&mut self, step: Step, status: impl Into<StepStatus>) {
        self.results.insert(step, status.into());
    }

    pub fn get(&self, step: Step) -> Option<StepStatus> {
        self.results.get(&step).copied()
    }

    /// Whether `step` was recorded and counts as a success.
    pub fn succeeded(&self, step: Step) -> bool {
        self.get(step).is_some_and(|s| s.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.values().all(StepStatus::is_success)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Step, StepStatus)> + '_ {
        self.results.iter().map(|(step, status)| (*step, *status))
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Outcomes,
    pub diagnostics: Diagnostics,
}

impl RunReport {
    /// 0 when every recorded step succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.outcomes.all_succeeded() { 0 } else { 1 }
    }
}
