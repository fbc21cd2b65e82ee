//! Cleanup Report
//!
//! Per-claim outcomes of a cleanup run plus a few run-level facts.

use crate::cleanup::classifier::OrphanReason;
use crate::domain::ports::NamespaceScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to a single orphaned claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "error")]
pub enum DeletionStatus {
    Deleted,
    /// Dry run; no delete request was issued
    WouldDelete,
    Failed(String),
}

/// Outcome for one orphaned claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOutcome {
    pub namespace: String,
    pub name: String,
    pub reason: OrphanReason,
    pub status: DeletionStatus,
}

/// Summary of a cleanup run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    pub scope: NamespaceScope,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Claims returned by the listing
    pub claims_listed: usize,
    /// Claims left after name filtering
    pub claims_considered: usize,
    /// Set when workloads could not be listed
    pub usage_unavailable: Option<String>,
    pub outcomes: Vec<ClaimOutcome>,
}

impl CleanupReport {
    pub fn new(scope: NamespaceScope, dry_run: bool) -> Self {
        Self {
            scope,
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
            claims_listed: 0,
            claims_considered: 0,
            usage_unavailable: None,
            outcomes: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn record(&mut self, outcome: ClaimOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn deleted(&self) -> impl Iterator<Item = &ClaimOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DeletionStatus::Deleted))
    }

    pub fn failed(&self) -> impl Iterator<Item = &ClaimOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DeletionStatus::Failed(_)))
    }

    pub fn orphan_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_degraded(&self) -> bool {
        self.usage_unavailable.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ClaimPhase;

    fn outcome(name: &str, status: DeletionStatus) -> ClaimOutcome {
        ClaimOutcome {
            namespace: "default".into(),
            name: name.into(),
            reason: OrphanReason::Unbound(ClaimPhase::Pending),
            status,
        }
    }

    #[test]
    fn test_report_counts() {
        let mut report = CleanupReport::new(NamespaceScope::All, false);
        report.record(outcome("a", DeletionStatus::Deleted));
        report.record(outcome("b", DeletionStatus::Failed("conflict".into())));
        report.record(outcome("c", DeletionStatus::Deleted));
        report.finish();

        assert_eq!(report.orphan_count(), 3);
        let deleted: Vec<&str> = report.deleted().map(|o| o.name.as_str()).collect();
        assert_eq!(deleted, vec!["a", "c"]);
        assert_eq!(report.failed().count(), 1);
        assert!(!report.is_degraded());
        assert!(report.finished_at.unwrap() >= report.started_at);
    }

    #[test]
    fn test_report_serializes() {
        let mut report = CleanupReport::new(NamespaceScope::Namespace("apps".into()), true);
        report.record(outcome("a", DeletionStatus::WouldDelete));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dryRun"], true);
        assert_eq!(json["outcomes"][0]["name"], "a");
        assert_eq!(json["outcomes"][0]["status"]["state"], "wouldDelete");
    }
}
