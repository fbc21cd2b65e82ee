//! In-Memory Cluster Adapter
//!
//! Holds claims and workloads in memory and can be told to fail specific
//! operations. Used to exercise the cleanup pipeline without a cluster.

use crate::domain::ports::{ClusterClient, NamespaceScope, StorageClaim, Workload};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio::sync::RwLock;
use tracing::debug;

// =============================================================================
// Fault Injection
// =============================================================================

#[derive(Debug, Clone, Default)]
struct Faults {
    claim_listing: Option<String>,
    workload_listing: Option<String>,
    /// Claim names whose deletion fails
    deletes: BTreeSet<String>,
}

// =============================================================================
// In-Memory Cluster
// =============================================================================

/// Cluster adapter backed by in-memory state
#[derive(Debug, Default)]
pub struct InMemoryCluster {
    claims: RwLock<Vec<StorageClaim>>,
    workloads: RwLock<Vec<Workload>>,
    faults: RwLock<Faults>,
    /// Every delete request received, in order, as (namespace, name)
    delete_requests: RwLock<Vec<(String, String)>>,
}

impl InMemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claims(mut self, claims: Vec<StorageClaim>) -> Self {
        *self.claims.get_mut() = claims;
        self
    }

    pub fn with_workloads(mut self, workloads: Vec<Workload>) -> Self {
        *self.workloads.get_mut() = workloads;
        self
    }

    /// Make claim listing fail with `reason`
    pub fn fail_claim_listing(mut self, reason: impl Into<String>) -> Self {
        self.faults.get_mut().claim_listing = Some(reason.into());
        self
    }

    /// Make workload listing fail with `reason`
    pub fn fail_workload_listing(mut self, reason: impl Into<String>) -> Self {
        self.faults.get_mut().workload_listing = Some(reason.into());
        self
    }

    /// Make deleting the named claim fail
    pub fn fail_delete(mut self, name: impl Into<String>) -> Self {
        self.faults.get_mut().deletes.insert(name.into());
        self
    }

    /// Names of the claims still present
    pub async fn claim_names(&self) -> Vec<String> {
        self.claims.read().await.iter().map(|c| c.name.clone()).collect()
    }

    /// Delete requests received so far, including failed ones
    pub async fn delete_requests(&self) -> Vec<(String, String)> {
        self.delete_requests.read().await.clone()
    }
}

#[async_trait]
impl ClusterClient for InMemoryCluster {
    async fn list_storage_claims(&self, scope: &NamespaceScope) -> Result<Vec<StorageClaim>> {
        if let Some(reason) = &self.faults.read().await.claim_listing {
            return Err(Error::Internal(reason.clone()));
        }

        Ok(self
            .claims
            .read()
            .await
            .iter()
            .filter(|c| scope.contains(&c.namespace))
            .cloned()
            .collect())
    }

    async fn list_workloads(&self, scope: &NamespaceScope) -> Result<Vec<Workload>> {
        if let Some(reason) = &self.faults.read().await.workload_listing {
            return Err(Error::Internal(reason.clone()));
        }

        Ok(self
            .workloads
            .read()
            .await
            .iter()
            .filter(|w| scope.contains(&w.namespace))
            .cloned()
            .collect())
    }

    async fn delete_storage_claim(&self, namespace: &str, name: &str) -> Result<()> {
        self.delete_requests
            .write()
            .await
            .push((namespace.to_string(), name.to_string()));

        if self.faults.read().await.deletes.contains(name) {
            return Err(Error::Internal(format!(
                "injected failure deleting {}/{}",
                namespace, name
            )));
        }

        let mut claims = self.claims.write().await;
        let before = claims.len();
        claims.retain(|c| !(c.namespace == namespace && c.name == name));

        if claims.len() == before {
            return Err(Error::ResourceNotFound {
                kind: "PersistentVolumeClaim".into(),
                name: format!("{}/{}", namespace, name),
            });
        }

        debug!("Removed in-memory claim {}/{}", namespace, name);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{ClaimPhase, VolumeRef};
    use assert_matches::assert_matches;

    fn cluster() -> InMemoryCluster {
        InMemoryCluster::new()
            .with_claims(vec![
                StorageClaim::new("apps", "data-0", ClaimPhase::Bound),
                StorageClaim::new("ci", "cache-0", ClaimPhase::Pending),
            ])
            .with_workloads(vec![
                Workload::new("apps", "web-0", vec![VolumeRef::claim("data", "data-0")]),
                Workload::new("ci", "runner", vec![VolumeRef::other("tmp")]),
            ])
    }

    #[tokio::test]
    async fn test_listing_respects_scope() {
        let cluster = cluster();

        let all = cluster.list_storage_claims(&NamespaceScope::All).await.unwrap();
        assert_eq!(all.len(), 2);

        let apps = NamespaceScope::Namespace("apps".into());
        let claims = cluster.list_storage_claims(&apps).await.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].name, "data-0");

        let pods = cluster.list_workloads(&apps).await.unwrap();
        assert_eq!(pods.len(), 1);
        assert_eq!(pods[0].name, "web-0");
    }

    #[tokio::test]
    async fn test_delete() {
        let cluster = cluster();

        cluster.delete_storage_claim("ci", "cache-0").await.unwrap();
        assert_eq!(cluster.claim_names().await, vec!["data-0"]);

        // Name matches but namespace does not
        let err = cluster.delete_storage_claim("ci", "data-0").await.unwrap_err();
        assert_matches!(err, Error::ResourceNotFound { .. });
        assert_eq!(cluster.delete_requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let cluster = cluster()
            .fail_claim_listing("etcd unavailable")
            .fail_workload_listing("pods is forbidden")
            .fail_delete("data-0");

        assert!(cluster.list_storage_claims(&NamespaceScope::All).await.is_err());
        assert!(cluster.list_workloads(&NamespaceScope::All).await.is_err());
        assert!(cluster.delete_storage_claim("apps", "data-0").await.is_err());
        assert_eq!(cluster.claim_names().await.len(), 2);
    }
}
