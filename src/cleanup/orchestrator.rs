//! Cleanup Orchestrator
//!
//! Runs one cleanup pass:
//! - list claims in scope (fatal on failure)
//! - apply the name filter
//! - list workloads (on failure, fall back to phase-only detection)
//! - classify each claim and delete the orphans, one at a time
//!
//! A failed deletion is reported and the pass moves on to the next claim.

use crate::cleanup::classifier::classify;
use crate::cleanup::filter::NameFilter;
use crate::cleanup::report::{ClaimOutcome, CleanupReport, DeletionStatus};
use crate::cleanup::usage::{Usage, UsageIndex};
use crate::config::CleanupConfig;
use crate::domain::ports::{ClusterClientRef, NamespaceScope, StorageClaim};
use crate::error::{Error, Result};
use tracing::{debug, error, info, warn};

// =============================================================================
// Orchestrator
// =============================================================================

/// Drives the list, filter, classify, delete pipeline against a cluster
pub struct Orchestrator {
    cluster: ClusterClientRef,
    scope: NamespaceScope,
    filter: NameFilter,
    dry_run: bool,
}

impl Orchestrator {
    /// Create an orchestrator from an explicit config
    pub fn new(config: &CleanupConfig, cluster: ClusterClientRef) -> Self {
        Self {
            cluster,
            scope: config.scope(),
            filter: config.name_filter(),
            dry_run: false,
        }
    }

    /// Report orphans without deleting them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn scope(&self) -> &NamespaceScope {
        &self.scope
    }

    pub fn filter(&self) -> &NameFilter {
        &self.filter
    }

    /// Run a single cleanup pass
    pub async fn run(&self) -> Result<CleanupReport> {
        info!(
            "Starting cleanup in {} (backend: {}, filters: {}, dry run: {})",
            self.scope,
            self.cluster.backend_name(),
            self.filter,
            self.dry_run
        );

        let mut report = CleanupReport::new(self.scope.clone(), self.dry_run);

        let claims = self
            .cluster
            .list_storage_claims(&self.scope)
            .await
            .map_err(|e| Error::ClaimListing {
                scope: self.scope.to_string(),
                source: Box::new(e),
            })?;
        report.claims_listed = claims.len();

        let claims = self.filter.apply(claims);
        report.claims_considered = claims.len();
        debug!(
            "{} of {} claims passed the name filter",
            report.claims_considered, report.claims_listed
        );

        let usage = self.load_usage().await;
        if let Usage::Unavailable { reason } = &usage {
            report.usage_unavailable = Some(reason.clone());
        }

        for claim in &claims {
            let Some(reason) = classify(claim, &usage) else {
                debug!("Keeping {}/{}", claim.namespace, claim.name);
                continue;
            };

            info!("Orphaned: {}/{} ({})", claim.namespace, claim.name, reason);
            let status = self.delete(claim).await;

            report.record(ClaimOutcome {
                namespace: claim.namespace.clone(),
                name: claim.name.clone(),
                reason,
                status,
            });
        }

        report.finish();
        info!(
            "Cleanup finished: {} considered, {} orphaned, {} deleted, {} failed",
            report.claims_considered,
            report.orphan_count(),
            report.deleted().count(),
            report.failed().count()
        );

        Ok(report)
    }

    /// List workloads and build the usage view for this pass
    async fn load_usage(&self) -> Usage {
        match self.cluster.list_workloads(&self.scope).await {
            Ok(workloads) => {
                let index = UsageIndex::build(&workloads);
                debug!(
                    "{} workloads reference {} claims",
                    workloads.len(),
                    index.len()
                );
                Usage::Known(index)
            }
            Err(e) => {
                let err = Error::WorkloadListing {
                    scope: self.scope.to_string(),
                    source: Box::new(e),
                };
                warn!(
                    "{}. Won't be able to delete unused PVCs, only unbound ones.",
                    err
                );
                Usage::unavailable(err.to_string())
            }
        }
    }

    /// Delete one orphan, turning failure into a reported outcome
    async fn delete(&self, claim: &StorageClaim) -> DeletionStatus {
        if self.dry_run {
            info!("Dry run, not deleting: {}/{}", claim.namespace, claim.name);
            return DeletionStatus::WouldDelete;
        }

        info!("Deleting: {}/{}", claim.namespace, claim.name);
        match self
            .cluster
            .delete_storage_claim(&claim.namespace, &claim.name)
            .await
        {
            Ok(()) => {
                info!("Deleted: {}/{}", claim.namespace, claim.name);
                DeletionStatus::Deleted
            }
            Err(e) => {
                let err = Error::ClaimDeletion {
                    namespace: claim.namespace.clone(),
                    name: claim.name.clone(),
                    source: Box::new(e),
                };
                error!("{}", err);
                DeletionStatus::Failed(err.to_string())
            }
        }
    }
}
