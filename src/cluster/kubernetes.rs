//! Kubernetes Cluster Adapter
//!
//! Lists PersistentVolumeClaims and Pods and deletes claims through the
//! Kubernetes API using kube-rs.

use crate::domain::ports::{
    ClaimPhase, ClusterClient, NamespaceScope, StorageClaim, VolumeRef, Workload,
};
use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod};
use kube::api::{Api, DeleteParams, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config, ResourceExt};
use std::path::Path;
use tracing::{debug, info, warn};

// =============================================================================
// Conversions
// =============================================================================

impl From<&PersistentVolumeClaim> for StorageClaim {
    fn from(pvc: &PersistentVolumeClaim) -> Self {
        let phase = pvc.status.as_ref().and_then(|s| s.phase.as_deref());
        StorageClaim::new(
            pvc.namespace().unwrap_or_default(),
            pvc.name_any(),
            ClaimPhase::from_status(phase),
        )
    }
}

impl From<&Pod> for Workload {
    fn from(pod: &Pod) -> Self {
        let volumes = pod
            .spec
            .as_ref()
            .and_then(|spec| spec.volumes.as_ref())
            .map(|volumes| {
                volumes
                    .iter()
                    .map(|v| VolumeRef {
                        name: v.name.clone(),
                        claim_name: v
                            .persistent_volume_claim
                            .as_ref()
                            .map(|pvc| pvc.claim_name.clone()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Workload::new(pod.namespace().unwrap_or_default(), pod.name_any(), volumes)
    }
}

// =============================================================================
// Kube Cluster
// =============================================================================

/// Cluster adapter talking to a real API server
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using an explicit kubeconfig, or kube's inferred config.
    ///
    /// If the given kubeconfig cannot be used, falls back to the in-cluster
    /// service account config.
    pub async fn connect(kubeconfig: Option<&Path>) -> Result<Self> {
        let config = match kubeconfig {
            Some(path) => match Self::config_from_file(path).await {
                Ok(config) => config,
                Err(e) => {
                    warn!("{} attempting in-cluster config", e);
                    Config::incluster()?
                }
            },
            None => Config::infer().await?,
        };

        info!("Connecting to Kubernetes API at {}", config.cluster_url);
        let client = Client::try_from(config)?;
        Ok(Self::new(client))
    }

    async fn config_from_file(path: &Path) -> Result<Config> {
        debug!("Loading kubeconfig from {:?}", path);
        let kubeconfig = Kubeconfig::read_from(path)?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
        Ok(config)
    }

    fn api<K>(&self, scope: &NamespaceScope) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <K as kube::Resource>::DynamicType: Default,
    {
        match scope {
            NamespaceScope::All => Api::all(self.client.clone()),
            NamespaceScope::Namespace(ns) => Api::namespaced(self.client.clone(), ns),
        }
    }
}

#[async_trait]
impl ClusterClient for KubeCluster {
    async fn list_storage_claims(&self, scope: &NamespaceScope) -> Result<Vec<StorageClaim>> {
        let pvcs = self
            .api::<PersistentVolumeClaim>(scope)
            .list(&ListParams::default())
            .await?;

        debug!("Listed {} PersistentVolumeClaims in {}", pvcs.items.len(), scope);
        Ok(pvcs.items.iter().map(StorageClaim::from).collect())
    }

    async fn list_workloads(&self, scope: &NamespaceScope) -> Result<Vec<Workload>> {
        let pods = self.api::<Pod>(scope).list(&ListParams::default()).await?;

        debug!("Listed {} Pods in {}", pods.items.len(), scope);
        Ok(pods.items.iter().map(Workload::from).collect())
    }

    async fn delete_storage_claim(&self, namespace: &str, name: &str) -> Result<()> {
        let api: Api<PersistentVolumeClaim> = Api::namespaced(self.client.clone(), namespace);
        api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "kubernetes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{
        PersistentVolumeClaimStatus, PersistentVolumeClaimVolumeSource, PodSpec, Volume,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn meta(namespace: &str, name: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    fn pvc(name: &str, phase: Option<&str>) -> PersistentVolumeClaim {
        PersistentVolumeClaim {
            metadata: meta("apps", name),
            status: Some(PersistentVolumeClaimStatus {
                phase: phase.map(str::to_string),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_pvc_conversion() {
        let claim = StorageClaim::from(&pvc("data-0", Some("Bound")));
        assert_eq!(claim, StorageClaim::new("apps", "data-0", ClaimPhase::Bound));

        let claim = StorageClaim::from(&pvc("data-1", Some("Pending")));
        assert_eq!(claim.phase, ClaimPhase::Pending);

        let claim = StorageClaim::from(&pvc("data-2", None));
        assert_eq!(claim.phase, ClaimPhase::Unknown);

        let no_status = PersistentVolumeClaim {
            metadata: meta("apps", "data-3"),
            ..Default::default()
        };
        assert_eq!(StorageClaim::from(&no_status).phase, ClaimPhase::Unknown);
    }

    #[test]
    fn test_pod_conversion() {
        let pod = Pod {
            metadata: meta("apps", "web-0"),
            spec: Some(PodSpec {
                volumes: Some(vec![
                    Volume {
                        name: "data".into(),
                        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                            claim_name: "data-web-0".into(),
                            read_only: None,
                        }),
                        ..Default::default()
                    },
                    Volume {
                        name: "tmp".into(),
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let workload = Workload::from(&pod);
        assert_eq!(workload.name, "web-0");
        assert_eq!(workload.namespace, "apps");
        assert_eq!(
            workload.volumes,
            vec![VolumeRef::claim("data", "data-web-0"), VolumeRef::other("tmp")]
        );
    }

    #[test]
    fn test_pod_without_spec() {
        let pod = Pod {
            metadata: meta("apps", "pending"),
            ..Default::default()
        };
        assert!(Workload::from(&pod).volumes.is_empty());
    }
}
