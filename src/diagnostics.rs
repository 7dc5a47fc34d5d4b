// ABOUTME: Diagnostics accumulator for non-fatal warnings during a deployment run.
// ABOUTME: Collects conditions worth repeating before the summary without failing the run.

/// Collects non-fatal warnings during deployment operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::debug!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Database step recorded success without confirming the project.
    pub fn assumed_configured(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::AssumedConfigured,
            message: message.into(),
        }
    }

    /// Backend redeploy went through the git push fallback.
    pub fn push_fallback(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::PushFallback,
            message: message.into(),
        }
    }

    /// Health endpoint never answered 200 within the poll budget.
    pub fn health_pending(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::HealthPending,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Database configuration could not be confirmed and was assumed.
    AssumedConfigured,
    /// No backend token; redeploy was triggered through git.
    PushFallback,
    /// Backend still not healthy after the last poll.
    HealthPending,
}
