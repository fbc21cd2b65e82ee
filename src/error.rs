//! Error types for the PVC reaper
//!
//! Provides structured error types for configuration loading, cluster
//! access, and the cleanup pipeline, plus a mapping from each error to
//! how a cleanup run reacts to it.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the reaper
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Config File Errors
    // =========================================================================
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("In file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // =========================================================================
    // Kubernetes Errors
    // =========================================================================
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Resource not found: {kind}/{name}")]
    ResourceNotFound { kind: String, name: String },

    #[error("Kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("In-cluster config error: {0}")]
    InCluster(#[from] kube::config::InClusterError),

    #[error("Unable to infer cluster config: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    // =========================================================================
    // Cleanup Pipeline Errors
    // =========================================================================
    #[error("Failed to list PersistentVolumeClaims in {scope}: {source}")]
    ClaimListing {
        scope: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to list Pods in {scope}: {source}")]
    WorkloadListing {
        scope: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to delete PersistentVolumeClaim {namespace}/{name}: {source}")]
    ClaimDeletion {
        namespace: String,
        name: String,
        #[source]
        source: Box<Error>,
    },

    // =========================================================================
    // Parse / IO Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a cleanup run reacts to an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Nothing meaningful can be done; the run ends abnormally
    Abort,
    /// Continue with phase-only orphan detection
    Degrade,
    /// Report the failed item and move on to the next one
    SkipItem,
    /// Report and continue with default configuration
    UseDefaults,
}

impl Error {
    /// Determine how a run reacts to this error
    pub fn failure_mode(&self) -> FailureMode {
        match self {
            Error::WorkloadListing { .. } => FailureMode::Degrade,

            Error::ClaimDeletion { .. } => FailureMode::SkipItem,

            Error::ConfigRead { .. } | Error::ConfigParse { .. } => FailureMode::UseDefaults,

            // Listing claims, connecting, and everything else ends the run
            _ => FailureMode::Abort,
        }
    }

    /// Check if the run can continue past this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.failure_mode(), FailureMode::Abort)
    }
}

/// Result type alias for the reaper
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_modes() {
        let err = Error::ClaimListing {
            scope: "all namespaces".into(),
            source: Box::new(Error::Internal("boom".into())),
        };
        assert_eq!(err.failure_mode(), FailureMode::Abort);

        let err = Error::WorkloadListing {
            scope: "default".into(),
            source: Box::new(Error::Internal("forbidden".into())),
        };
        assert_eq!(err.failure_mode(), FailureMode::Degrade);

        let err = Error::ClaimDeletion {
            namespace: "default".into(),
            name: "data-1".into(),
            source: Box::new(Error::Internal("conflict".into())),
        };
        assert_eq!(err.failure_mode(), FailureMode::SkipItem);

        let err = Error::ConfigRead {
            path: "config.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.failure_mode(), FailureMode::UseDefaults);
    }

    #[test]
    fn test_error_recoverable() {
        let fatal = Error::Configuration("invalid".into());
        assert!(!fatal.is_recoverable());

        let item = Error::ClaimDeletion {
            namespace: "ns".into(),
            name: "pvc".into(),
            source: Box::new(Error::Internal("timeout".into())),
        };
        assert!(item.is_recoverable());
        assert!(item.to_string().contains("ns/pvc"));
    }
}
