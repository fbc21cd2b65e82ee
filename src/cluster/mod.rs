//! Cluster Adapters
//!
//! Implementations of [`ClusterClient`](crate::domain::ports::ClusterClient):
//! - Kubernetes: the real API server via kube-rs
//! - InMemory: in-process state with fault injection

pub mod kubernetes;
pub mod memory;

pub use kubernetes::*;
pub use memory::*;
