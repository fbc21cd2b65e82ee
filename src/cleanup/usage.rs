//! Usage Index
//!
//! Records which claims are referenced by running workloads. The index is
//! built once per run from a complete workload listing and never mutated.

use crate::domain::ports::Workload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of claim names referenced by at least one workload volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageIndex {
    claims: BTreeSet<String>,
}

impl UsageIndex {
    /// Build the index from every volume of every workload
    pub fn build<'a, I>(workloads: I) -> Self
    where
        I: IntoIterator<Item = &'a Workload>,
    {
        let claims = workloads
            .into_iter()
            .flat_map(Workload::claim_names)
            .map(str::to_string)
            .collect();
        Self { claims }
    }

    /// Whether a claim with this name is referenced
    pub fn contains(&self, claim_name: &str) -> bool {
        self.claims.contains(claim_name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn claim_names(&self) -> impl Iterator<Item = &str> {
        self.claims.iter().map(String::as_str)
    }
}

// =============================================================================
// Usage View
// =============================================================================

/// What the run knows about claim usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Usage {
    /// Workloads were listed; the index is complete for the scope
    Known(UsageIndex),
    /// Workloads could not be listed; usage must not drive deletion
    Unavailable { reason: String },
}

impl Usage {
    pub fn from_workloads(workloads: &[Workload]) -> Self {
        Usage::Known(UsageIndex::build(workloads))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Usage::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Usage::Known(_))
    }

    pub fn index(&self) -> Option<&UsageIndex> {
        match self {
            Usage::Known(index) => Some(index),
            Usage::Unavailable { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::VolumeRef;

    fn pods() -> Vec<Workload> {
        vec![
            Workload::new(
                "default",
                "web-0",
                vec![VolumeRef::claim("data", "data-web-0"), VolumeRef::other("config")],
            ),
            Workload::new("default", "batch", vec![VolumeRef::other("scratch")]),
            Workload::new(
                "default",
                "web-1",
                vec![
                    VolumeRef::claim("data", "data-web-1"),
                    VolumeRef::claim("shared", "shared-assets"),
                ],
            ),
            Workload::new(
                "default",
                "web-2",
                vec![VolumeRef::claim("shared", "shared-assets")],
            ),
        ]
    }

    #[test]
    fn test_build_collects_referenced_claims() {
        let index = UsageIndex::build(&pods());

        assert_eq!(index.len(), 3);
        assert!(index.contains("data-web-0"));
        assert!(index.contains("data-web-1"));
        assert!(index.contains("shared-assets"));
        assert!(!index.contains("config"));
        assert!(!index.contains("scratch"));
    }

    #[test]
    fn test_build_empty() {
        let index = UsageIndex::build(&Vec::<Workload>::new());
        assert!(index.is_empty());
        assert!(!index.contains("anything"));
    }

    #[test]
    fn test_build_is_order_independent() {
        let forward = pods();
        let expected = UsageIndex::build(&forward);

        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(UsageIndex::build(&reversed), expected);

        let mut rotated = forward.clone();
        rotated.rotate_left(2);
        assert_eq!(UsageIndex::build(&rotated), expected);

        let mut swapped = forward;
        swapped.swap(0, 3);
        assert_eq!(UsageIndex::build(&swapped), expected);
    }

    #[test]
    fn test_usage_view() {
        let known = Usage::from_workloads(&pods());
        assert!(known.is_known());
        assert!(known.index().unwrap().contains("shared-assets"));

        let unavailable = Usage::unavailable("pods is forbidden");
        assert!(!unavailable.is_known());
        assert!(unavailable.index().is_none());
    }
}
