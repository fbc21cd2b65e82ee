//! PVC Reaper
//!
//! Finds and deletes orphaned PersistentVolumeClaims: claims that are not
//! `Bound`, or that no pod in the listing scope references.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Cleanup Orchestrator                      │
//! │   list claims ─► name filter ─► list pods ─► classify ─►     │
//! │                                               delete         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │ Name Filter  │  │ Usage Index  │  │ Orphan Classifier  │  │
//! │  └──────────────┘  └──────────────┘  └────────────────────┘  │
//! ├──────────────────────────────────────────────────────────────┤
//! │                   ClusterClient (port)                       │
//! │  ┌─────────────────────────┐  ┌────────────────────────────┐ │
//! │  │  Kubernetes (kube-rs)   │  │  In-memory (fault inject)  │ │
//! │  └─────────────────────────┘  └────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cleanup`]: Filtering, usage tracking, classification and the cleanup pass
//! - [`cluster`]: Cluster adapters
//! - [`config`]: Config file loading
//! - [`domain`]: Core domain types and the cluster port
//! - [`error`]: Error types and handling

pub mod cleanup;
pub mod cluster;
pub mod config;
pub mod domain;
pub mod error;

// Re-export commonly used types
pub use cleanup::{
    classify, is_orphan, prefix_filter, suffix_filter, ClaimOutcome, CleanupReport,
    DeletionStatus, NameFilter, NameRule, Orchestrator, OrphanReason, Usage, UsageIndex,
};

pub use cluster::{InMemoryCluster, KubeCluster};

pub use config::{CleanupConfig, DEFAULT_CONFIG_PATH};

pub use domain::ports::{
    ClaimPhase, ClusterClient, ClusterClientRef, NamespaceScope, Named, StorageClaim, VolumeRef,
    Workload,
};

pub use error::{Error, FailureMode, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
