//! Orphan Classifier
//!
//! Decides whether a claim is safe to delete:
//! - any claim that is not `Bound` is an orphan;
//! - a `Bound` claim is an orphan only when usage is known and no
//!   workload references it.
//!
//! When usage is unavailable a bound claim is always kept. An incomplete
//! workload listing must never cause a claim in use to be deleted.

use crate::cleanup::usage::Usage;
use crate::domain::ports::{ClaimPhase, StorageClaim};
use serde::{Deserialize, Serialize};

/// Why a claim was classified as an orphan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrphanReason {
    /// The claim is in a phase other than `Bound`
    Unbound(ClaimPhase),
    /// The claim is bound but no running workload references it
    Unreferenced,
}

impl std::fmt::Display for OrphanReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrphanReason::Unbound(phase) => write!(f, "phase is {}", phase),
            OrphanReason::Unreferenced => write!(f, "not used by any pod"),
        }
    }
}

/// Classify a claim, returning the reason it is an orphan if it is one
pub fn classify(claim: &StorageClaim, usage: &Usage) -> Option<OrphanReason> {
    if claim.phase != ClaimPhase::Bound {
        return Some(OrphanReason::Unbound(claim.phase));
    }

    match usage {
        Usage::Known(index) if !index.contains(&claim.name) => Some(OrphanReason::Unreferenced),
        _ => None,
    }
}

/// Whether a claim is a deletion candidate
pub fn is_orphan(claim: &StorageClaim, usage: &Usage) -> bool {
    classify(claim, usage).is_some()
}
