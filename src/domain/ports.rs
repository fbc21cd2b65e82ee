//! Domain Ports - Core types and the cluster boundary
//!
//! The cleanup pipeline only ever sees these types. Adapters translate
//! cluster objects into them and implement [`ClusterClient`].

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Namespace Scope
// =============================================================================

/// Namespace scope for listing resources
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceScope {
    /// Every namespace in the cluster
    #[default]
    All,
    /// A single namespace
    Namespace(String),
}

impl NamespaceScope {
    /// Build a scope from a configured namespace; empty means all
    pub fn from_config(namespace: &str) -> Self {
        let namespace = namespace.trim();
        if namespace.is_empty() {
            NamespaceScope::All
        } else {
            NamespaceScope::Namespace(namespace.to_string())
        }
    }

    /// Whether a resource in `namespace` falls inside this scope
    pub fn contains(&self, namespace: &str) -> bool {
        match self {
            NamespaceScope::All => true,
            NamespaceScope::Namespace(ns) => ns == namespace,
        }
    }
}

impl std::fmt::Display for NamespaceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamespaceScope::All => write!(f, "all namespaces"),
            NamespaceScope::Namespace(ns) => write!(f, "namespace {}", ns),
        }
    }
}

// =============================================================================
// Storage Claims
// =============================================================================

/// Lifecycle phase of a storage claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimPhase {
    Pending,
    Bound,
    Lost,
    Unknown,
}

impl ClaimPhase {
    /// Parse the phase string reported in a claim's status
    pub fn from_status(phase: Option<&str>) -> Self {
        match phase {
            Some("Pending") => ClaimPhase::Pending,
            Some("Bound") => ClaimPhase::Bound,
            Some("Lost") => ClaimPhase::Lost,
            _ => ClaimPhase::Unknown,
        }
    }
}

impl std::fmt::Display for ClaimPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimPhase::Pending => write!(f, "Pending"),
            ClaimPhase::Bound => write!(f, "Bound"),
            ClaimPhase::Lost => write!(f, "Lost"),
            ClaimPhase::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A persistent storage claim as seen by the cleanup pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageClaim {
    pub name: String,
    pub namespace: String,
    pub phase: ClaimPhase,
}

impl StorageClaim {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, phase: ClaimPhase) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            phase,
        }
    }
}

// =============================================================================
// Workloads
// =============================================================================

/// A volume declared by a workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRef {
    /// Workload-local volume name
    pub name: String,
    /// Claim referenced by name, if this volume is claim-backed
    pub claim_name: Option<String>,
}

impl VolumeRef {
    /// A volume backed by the named claim
    pub fn claim(name: impl Into<String>, claim_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            claim_name: Some(claim_name.into()),
        }
    }

    /// A volume with no claim behind it (emptyDir, configMap, ...)
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            claim_name: None,
        }
    }
}

/// A running workload and its volumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub name: String,
    pub namespace: String,
    pub volumes: Vec<VolumeRef>,
}

impl Workload {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, volumes: Vec<VolumeRef>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            volumes,
        }
    }

    /// Names of the claims this workload references
    pub fn claim_names(&self) -> impl Iterator<Item = &str> {
        self.volumes.iter().filter_map(|v| v.claim_name.as_deref())
    }
}

// =============================================================================
// Named Resources
// =============================================================================

/// Anything the name filter can be applied to
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for StorageClaim {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Workload {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

// =============================================================================
// Cluster Client Port
// =============================================================================

/// Port for the cluster operations the cleanup pipeline needs
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// List storage claims in scope
    async fn list_storage_claims(&self, scope: &NamespaceScope) -> Result<Vec<StorageClaim>>;

    /// List running workloads in scope
    async fn list_workloads(&self, scope: &NamespaceScope) -> Result<Vec<Workload>>;

    /// Delete a single storage claim
    async fn delete_storage_claim(&self, namespace: &str, name: &str) -> Result<()>;

    /// Adapter name, for logging
    fn backend_name(&self) -> &str;
}

pub type ClusterClientRef = Arc<dyn ClusterClient>;
